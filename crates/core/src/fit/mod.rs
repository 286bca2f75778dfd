//! Size recommendation engine.
//!
//! Data flows strictly one way, each stage a pure function over immutable
//! inputs:
//!
//! ```text
//! body::estimate -> ease::resolve -> matcher::match_sizes -> confidence::score
//! ```
//!
//! [`engine::recommend`] runs the whole chain for one request. The lookup
//! tables are constants, so any number of calls may run concurrently.

pub mod body;
pub mod confidence;
pub mod description;
pub mod ease;
pub mod engine;
pub mod matcher;
pub mod measurements;
pub mod size_chart;

pub use engine::{recommend, ProductSizing, RecommendationResult, UserMeasurementInput};

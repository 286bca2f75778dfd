//! FitEngine domain core.
//!
//! Pure, I/O-free logic shared by the database and API crates: the size
//! recommendation engine ([`fit`]), validated garment measurement types,
//! shared range validation helpers, and the domain error type.

pub mod catalog;
pub mod error;
pub mod fit;
pub mod threshold_validation;
pub mod types;

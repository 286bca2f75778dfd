pub mod products;
pub mod recommendations;
pub mod size_charts;

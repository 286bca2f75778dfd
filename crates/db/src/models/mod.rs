pub mod product;
pub mod size_chart;

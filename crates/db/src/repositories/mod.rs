pub mod product_repo;
pub mod size_chart_repo;

pub use product_repo::ProductRepo;
pub use size_chart_repo::SizeChartRepo;

pub mod models;
pub mod services;

pub use models::*;
pub use services::catalog::CatalogService;
pub use services::treatment::TreatmentService;

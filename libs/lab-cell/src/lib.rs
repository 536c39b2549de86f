pub mod models;
pub mod services;

pub use models::*;
pub use services::lab::LabService;
pub use services::orders::{LabOrderService, PlaceOrderRequest};

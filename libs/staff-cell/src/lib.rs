pub mod models;
pub mod services;

pub use models::*;
pub use services::auth::AuthService;
pub use services::staff::{CreateStaffRequest, StaffService};

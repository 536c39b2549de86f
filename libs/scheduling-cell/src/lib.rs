pub mod models;
pub mod services;
pub mod timefmt;

pub use models::*;
pub use services::booking::AppointmentService;
pub use services::conflict::conflicting_appointment;
pub use services::slots::{bucket_appointments, generate_slots, generate_slots_or_default};

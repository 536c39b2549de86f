pub mod models;
pub mod services;

pub use models::*;
pub use services::accounting::AccountingService;
pub use services::expenses::ExpenseService;
pub use services::invoices::InvoiceService;
pub use services::payments::PaymentService;

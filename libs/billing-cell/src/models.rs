use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// INVOICE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    /// Sequential display number, formatted as INV-0001.
    pub invoice_no: u32,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub treatment_id: Uuid,
    pub treatment_name: String,
    pub base_price: f64,
    pub diagnostic_fee: f64,
    pub discount: f64,
    pub discount_type: DiscountType,
    /// Final amount due, computed once at creation.
    pub total: f64,
    /// Sum of posted payments.
    pub paid: f64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of base price plus diagnostic fee.
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    Partial,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub treatment_id: Uuid,
    pub treatment_name: String,
    pub base_price: f64,
    pub diagnostic_fee: f64,
    pub discount: f64,
    pub discount_type: DiscountType,
    pub date: NaiveDate,
}

/// Amount due after discount, floored at zero.
pub fn invoice_total(
    base_price: f64,
    diagnostic_fee: f64,
    discount: f64,
    discount_type: DiscountType,
) -> f64 {
    let gross = base_price + diagnostic_fee;
    let reduction = match discount_type {
        DiscountType::Percentage => gross * discount / 100.0,
        DiscountType::Fixed => discount,
    };
    (gross - reduction).max(0.0)
}

pub fn format_invoice_no(n: u32) -> String {
    format!("INV-{n:04}")
}

// ==============================================================================
// PAYMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub patient_id: Uuid,
    pub amount: f64,
    pub method: PaymentMethod,
    pub date: NaiveDate,
    pub notes: String,
    /// Sequential receipt number, formatted as RCP-0001.
    pub receipt_no: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Other,
}

pub fn format_receipt_no(n: u32) -> String {
    format!("RCP-{n:04}")
}

// ==============================================================================
// EXPENSE AND PAYOUT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    /// One of the configured expense types, or empty when `custom_type` set.
    pub kind: String,
    pub custom_type: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Payout from the clinic to a doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorPayment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Per-doctor financial summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorAccountSummary {
    pub doctor_id: Uuid,
    /// Sum of invoice totals attributed to the doctor.
    pub invoiced: f64,
    /// Sum of payments collected against those invoices.
    pub collected: f64,
    /// Sum of payouts made to the doctor.
    pub paid_out: f64,
    /// Collected minus paid out.
    pub balance: f64,
}

/// Clinic revenue summary over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub collected: f64,
    pub expenses: f64,
    pub net: f64,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum BillingError {
    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("Record not found")]
    NotFound,

    #[error("Payment of {amount} exceeds the {remaining} remaining on the invoice")]
    Overpayment { amount: f64, remaining: f64 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<shared_storage::StorageError> for BillingError {
    fn from(e: shared_storage::StorageError) -> Self {
        BillingError::StorageError(e.to_string())
    }
}

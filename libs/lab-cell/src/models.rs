use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// LAB MODELS
// ==============================================================================

/// An external dental laboratory the clinic sends work to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lab {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// A kind of work a lab can perform, with its default cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabWorkType {
    pub id: Uuid,
    pub name: String,
    pub default_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabOrder {
    pub id: Uuid,
    /// Sequential display number, formatted as LAB-0001.
    pub order_no: u32,
    pub lab_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub work_type_id: Uuid,
    pub work_type_name: String,
    pub quantity: u32,
    /// Total cost billed by the lab for this order.
    pub cost: f64,
    pub sent_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: LabOrderStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabOrderStatus {
    Pending,
    Received,
    Cancelled,
}

/// Payment from the clinic to a lab, not tied to a single order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabPayment {
    pub id: Uuid,
    pub lab_id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// What the clinic still owes a lab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabBalance {
    pub lab_id: Uuid,
    /// Cost of all orders except cancelled ones.
    pub billed: f64,
    pub paid: f64,
    pub owed: f64,
}

pub fn format_order_no(n: u32) -> String {
    format!("LAB-{n:04}")
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LabError {
    #[error("Lab not found")]
    LabNotFound,

    #[error("Lab order not found")]
    OrderNotFound,

    #[error("Record not found")]
    NotFound,

    #[error("Order is {0:?} and can no longer change status")]
    OrderClosed(LabOrderStatus),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<shared_storage::StorageError> for LabError {
    fn from(e: shared_storage::StorageError) -> Self {
        LabError::StorageError(e.to_string())
    }
}

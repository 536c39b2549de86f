use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// STAFF MODELS
// ==============================================================================

/// Permission keys a nurse account can be granted. The dashboard needs no key.
pub const PERMISSION_KEYS: [&str; 7] = [
    "patients",
    "appointments",
    "invoices",
    "payments",
    "expenses",
    "labs",
    "settings",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub role: StaffRole,
    /// Set when the staff member is also a doctor record.
    pub doctor_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether this member may sign in to the app.
    #[serde(default)]
    pub has_login: bool,
    /// Permission keys granted to this member; see [`PERMISSION_KEYS`].
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Doctor,
    Nurse,
}

// ==============================================================================
// SESSION MODELS
// ==============================================================================

/// The signed-in account. Stored under a single key; at most one session
/// exists at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub role: SessionRole,
    /// Absent for the owner session.
    pub staff_id: Option<Uuid>,
    pub staff_name: String,
    /// Granted permission keys. Ignored for the owner, who can do anything.
    pub permissions: Vec<String>,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    Owner,
    Nurse,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum StaffError {
    #[error("Staff member not found")]
    NotFound,

    #[error("This account cannot sign in")]
    LoginNotAllowed,

    #[error("No active session")]
    NotSignedIn,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<shared_storage::StorageError> for StaffError {
    fn from(e: shared_storage::StorageError) -> Self {
        StaffError::StorageError(e.to_string())
    }
}

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// PATIENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    /// Sequential clinic file number, assigned on creation.
    pub file_no: u32,
    pub full_name: String,
    pub phone: String,
    pub country_code: String,
    pub gender: Gender,
    pub birth_year: i32,
    /// Full date of birth when known; `birth_year` stays the coarse fallback.
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub medical_history: String,
    pub distinct_mark: String,
    pub tags: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Age in whole years at `today`, preferring the full birth date.
    pub fn age(&self, today: NaiveDate) -> i32 {
        match self.birth_date {
            Some(birth) => {
                let mut age = today.years_since(birth).unwrap_or(0) as i32;
                if birth > today {
                    age = 0;
                }
                age
            }
            None => (today.year() - self.birth_year).max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub phone: String,
    pub country_code: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub medical_history: String,
    pub distinct_mark: String,
    pub tags: Vec<String>,
    pub created_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub country_code: Option<String>,
    pub birth_year: Option<i32>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub distinct_mark: Option<String>,
    pub tags: Option<Vec<String>>,
}

// ==============================================================================
// ATTACHED RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientFile {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Base64 payload of the uploaded document or radiograph.
    pub file_data: String,
    pub title: String,
    pub notes: String,
    pub file_type: PatientFileType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientFileType {
    File,
    Xray,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub medications: Vec<Medication>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub kind: String,
    pub duration_days: u32,
    pub notes: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<shared_storage::StorageError> for PatientError {
    fn from(e: shared_storage::StorageError) -> Self {
        PatientError::StorageError(e.to_string())
    }
}

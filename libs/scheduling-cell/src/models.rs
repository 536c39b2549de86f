use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_models::time::hhmm;

// ==============================================================================
// CLINIC CONFIGURATION MODELS
// ==============================================================================

/// One contiguous working window of the clinic day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkShift {
    pub id: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl WorkShift {
    pub fn new(id: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
        }
    }
}

/// Clinic-wide schedule configuration. All fields are required; defaults are
/// resolved here once, never at call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSettings {
    /// Weekday indices that are working days (0 = Sunday .. 6 = Saturday).
    pub work_days: Vec<u32>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub shifts: Vec<WorkShift>,
    /// ISO dates the clinic is closed regardless of weekday.
    pub holidays: Vec<NaiveDate>,
    pub logo: Option<String>,
    pub tags: Vec<String>,
    /// Booking slot granularity in minutes.
    pub slot_duration: u32,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
        Self {
            work_days: vec![0, 1, 2, 3, 4],
            start_time: start,
            end_time: end,
            shifts: vec![WorkShift::new("default", start, end)],
            holidays: vec![],
            logo: None,
            tags: ["VIP", "دكتور", "صديق", "موظف", "طالب"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            slot_duration: 30,
        }
    }
}

// ==============================================================================
// APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub doctor_id: Uuid,
    /// Registered patient, or none for a walk-in booked by name only.
    pub patient_id: Option<Uuid>,
    pub temp_patient_name: Option<String>,
    pub treatment_type: String,
    pub status: AppointmentStatus,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Waiting,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Waiting => write!(f, "waiting"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub doctor_id: Uuid,
    pub patient_id: Option<Uuid>,
    pub temp_patient_name: Option<String>,
    pub treatment_type: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: Option<u32>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Appointment conflicts with an existing booking for this doctor")]
    Conflict { conflicting_id: Uuid },

    #[error("Doctor not found or not active")]
    DoctorUnavailable,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<shared_storage::StorageError> for SchedulingError {
    fn from(e: shared_storage::StorageError) -> Self {
        SchedulingError::StorageError(e.to_string())
    }
}

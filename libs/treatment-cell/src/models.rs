use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// TREATMENT CATALOG MODELS
// ==============================================================================

/// Which anatomical target a treatment group applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentEffect {
    /// One tooth, identified by FDI number.
    Tooth,
    /// One jaw (upper or lower).
    Jaw,
    /// Both jaws at once, e.g. orthodontics.
    BothJaws,
    /// No anatomical target.
    None,
    /// Target chosen per treatment at entry time.
    Dynamic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentGroup {
    pub id: Uuid,
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub effect: TreatmentEffect,
    /// Seeded groups cannot be deleted.
    pub is_system: bool,
    pub treatments: Vec<Treatment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price: f64,
}

/// The thirteen seeded system groups.
pub fn default_treatment_groups() -> Vec<TreatmentGroup> {
    let groups = [
        ("RS", "ترميم", "Restoration", TreatmentEffect::Tooth),
        ("EN", "علاج عصب", "Endodontics", TreatmentEffect::Tooth),
        ("IM", "زراعة", "Implant", TreatmentEffect::Tooth),
        ("ES", "تجميل", "Esthetic", TreatmentEffect::Tooth),
        ("CR", "تيجان", "Crowns", TreatmentEffect::Tooth),
        ("OR", "تقويم أسنان", "Orthodontics", TreatmentEffect::BothJaws),
        ("SU", "جراحة", "Surgery", TreatmentEffect::Dynamic),
        ("PR", "أمراض لثة", "Periodontics", TreatmentEffect::Jaw),
        ("PO", "تركيبات صناعية", "Prosthodontics", TreatmentEffect::None),
        ("PD", "أطفال", "Pediatric", TreatmentEffect::Tooth),
        ("OT", "علاجات أخرى سن", "Other Tooth", TreatmentEffect::Tooth),
        ("OJ", "علاجات أخرى فك", "Other Jaw", TreatmentEffect::Jaw),
        ("OB", "علاجات أخرى فكين", "Other Both Jaws", TreatmentEffect::BothJaws),
    ];
    groups
        .into_iter()
        .map(|(code, name_ar, name_en, effect)| TreatmentGroup {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name_ar: name_ar.to_string(),
            name_en: name_en.to_string(),
            effect,
            is_system: true,
            treatments: vec![],
        })
        .collect()
}

// ==============================================================================
// PATIENT TREATMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jaw {
    Upper,
    Lower,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    Planned,
    InProgress,
    Completed,
}

/// Anatomical target of one patient treatment, constrained by the group's
/// [`TreatmentEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentTarget {
    Tooth(u8),
    Jaw(Jaw),
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientTreatment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub group_id: Uuid,
    pub treatment_id: Uuid,
    pub treatment_name: String,
    /// FDI number for tooth-scoped treatments.
    pub tooth_number: Option<u8>,
    /// Jaw for jaw-scoped treatments.
    pub jaw: Option<Jaw>,
    pub status: TreatmentStatus,
    pub doctor_id: Uuid,
    pub invoice_id: Option<Uuid>,
    pub sessions: Vec<TreatmentSession>,
    /// Imported historical work, shown but excluded from billing flows.
    pub is_old_treatment: bool,
    pub created_at: DateTime<Utc>,
    /// Doctor notes recorded on completion.
    pub completed_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentSession {
    pub id: Uuid,
    pub date: NaiveDate,
    pub notes: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum TreatmentError {
    #[error("Treatment group not found")]
    GroupNotFound,

    #[error("Treatment not found")]
    NotFound,

    #[error("System treatment groups cannot be deleted")]
    SystemGroupImmutable,

    #[error("Target {0} does not match the group's effect")]
    TargetMismatch(String),

    #[error("Unknown FDI tooth number: {0}")]
    UnknownTooth(u8),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<shared_storage::StorageError> for TreatmentError {
    fn from(e: shared_storage::StorageError) -> Self {
        TreatmentError::StorageError(e.to_string())
    }
}

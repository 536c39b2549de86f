use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use dental_chart_cell::{DECIDUOUS_ORDER, PERMANENT_ORDER};
use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{
    PatientTreatment, TreatmentEffect, TreatmentError, TreatmentSession, TreatmentStatus,
    TreatmentTarget,
};
use crate::services::catalog::CatalogService;

/// Per-patient treatment records; the dental chart is a view over these.
pub struct TreatmentService {
    store: Arc<dyn KeyValueStore>,
    catalog: CatalogService,
}

impl TreatmentService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = CatalogService::new(store.clone());
        Self { store, catalog }
    }

    pub fn list(&self) -> Result<Vec<PatientTreatment>, TreatmentError> {
        Ok(read_or(self.store.as_ref(), keys::PATIENT_TREATMENTS, vec![])?)
    }

    pub fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<PatientTreatment>, TreatmentError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.patient_id == patient_id)
            .collect())
    }

    /// Treatments attached to one tooth of a patient, for chart rendering.
    pub fn for_tooth(
        &self,
        patient_id: Uuid,
        fdi: u8,
    ) -> Result<Vec<PatientTreatment>, TreatmentError> {
        Ok(self
            .list_for_patient(patient_id)?
            .into_iter()
            .filter(|t| t.tooth_number == Some(fdi))
            .collect())
    }

    /// Record a treatment for a patient. The anatomical target must agree
    /// with the group's effect; tooth targets must be valid FDI numbers.
    pub fn add(
        &self,
        patient_id: Uuid,
        treatment_id: Uuid,
        doctor_id: Uuid,
        target: TreatmentTarget,
        is_old_treatment: bool,
    ) -> Result<PatientTreatment, TreatmentError> {
        let (group, treatment) = self.catalog.find_treatment(treatment_id)?;
        validate_target(group.effect, target)?;

        let (tooth_number, jaw) = match target {
            TreatmentTarget::Tooth(fdi) => {
                if !is_known_fdi(fdi) {
                    return Err(TreatmentError::UnknownTooth(fdi));
                }
                (Some(fdi), None)
            }
            TreatmentTarget::Jaw(jaw) => (None, Some(jaw)),
            TreatmentTarget::None => (None, None),
        };

        let record = PatientTreatment {
            id: Uuid::new_v4(),
            patient_id,
            group_id: group.id,
            treatment_id,
            treatment_name: treatment.name,
            tooth_number,
            jaw,
            status: TreatmentStatus::Planned,
            doctor_id,
            invoice_id: None,
            sessions: vec![],
            is_old_treatment,
            created_at: Utc::now(),
            completed_notes: None,
        };

        let mut all = self.list()?;
        all.push(record.clone());
        write(self.store.as_ref(), keys::PATIENT_TREATMENTS, &all)?;

        debug!("Treatment {} recorded for patient {}", record.id, patient_id);
        Ok(record)
    }

    pub fn add_session(
        &self,
        id: Uuid,
        date: NaiveDate,
        notes: String,
    ) -> Result<PatientTreatment, TreatmentError> {
        self.mutate(id, |t| {
            t.sessions.push(TreatmentSession {
                id: Uuid::new_v4(),
                date,
                notes,
            });
            if t.status == TreatmentStatus::Planned {
                t.status = TreatmentStatus::InProgress;
            }
        })
    }

    pub fn complete(
        &self,
        id: Uuid,
        completed_notes: Option<String>,
    ) -> Result<PatientTreatment, TreatmentError> {
        self.mutate(id, |t| {
            t.status = TreatmentStatus::Completed;
            t.completed_notes = completed_notes;
        })
    }

    pub fn link_invoice(&self, id: Uuid, invoice_id: Uuid) -> Result<PatientTreatment, TreatmentError> {
        self.mutate(id, |t| t.invoice_id = Some(invoice_id))
    }

    fn mutate(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut PatientTreatment),
    ) -> Result<PatientTreatment, TreatmentError> {
        let mut all = self.list()?;
        let record = all
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TreatmentError::NotFound)?;
        apply(record);
        let updated = record.clone();
        write(self.store.as_ref(), keys::PATIENT_TREATMENTS, &all)?;
        Ok(updated)
    }
}

fn validate_target(effect: TreatmentEffect, target: TreatmentTarget) -> Result<(), TreatmentError> {
    let ok = match effect {
        TreatmentEffect::Tooth => matches!(target, TreatmentTarget::Tooth(_)),
        TreatmentEffect::Jaw => {
            matches!(target, TreatmentTarget::Jaw(j) if j != crate::models::Jaw::Both)
        }
        TreatmentEffect::BothJaws => {
            matches!(target, TreatmentTarget::Jaw(crate::models::Jaw::Both))
        }
        TreatmentEffect::None => matches!(target, TreatmentTarget::None),
        // Dynamic groups accept any target.
        TreatmentEffect::Dynamic => true,
    };
    if ok {
        Ok(())
    } else {
        Err(TreatmentError::TargetMismatch(format!("{target:?}")))
    }
}

fn is_known_fdi(fdi: u8) -> bool {
    PERMANENT_ORDER.contains(&fdi) || DECIDUOUS_ORDER.contains(&fdi)
}

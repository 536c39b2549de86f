use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{Medication, PatientError, PatientFile, PatientFileType, Prescription};

/// Documents and prescriptions attached to a patient record.
pub struct PatientRecordsService {
    store: Arc<dyn KeyValueStore>,
}

impl PatientRecordsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn files_for(&self, patient_id: Uuid) -> Result<Vec<PatientFile>, PatientError> {
        let files: Vec<PatientFile> = read_or(self.store.as_ref(), keys::PATIENT_FILES, vec![])?;
        Ok(files
            .into_iter()
            .filter(|f| f.patient_id == patient_id)
            .collect())
    }

    pub fn attach_file(
        &self,
        patient_id: Uuid,
        title: String,
        notes: String,
        file_type: PatientFileType,
        file_data: String,
    ) -> Result<PatientFile, PatientError> {
        let file = PatientFile {
            id: Uuid::new_v4(),
            patient_id,
            file_data,
            title,
            notes,
            file_type,
            created_at: Utc::now(),
        };

        let mut files: Vec<PatientFile> =
            read_or(self.store.as_ref(), keys::PATIENT_FILES, vec![])?;
        files.push(file.clone());
        write(self.store.as_ref(), keys::PATIENT_FILES, &files)?;

        debug!("Attached {:?} file {} to patient {}", file.file_type, file.id, patient_id);
        Ok(file)
    }

    pub fn remove_file(&self, id: Uuid) -> Result<(), PatientError> {
        let mut files: Vec<PatientFile> =
            read_or(self.store.as_ref(), keys::PATIENT_FILES, vec![])?;
        let before = files.len();
        files.retain(|f| f.id != id);
        if files.len() == before {
            return Err(PatientError::NotFound);
        }
        write(self.store.as_ref(), keys::PATIENT_FILES, &files)?;
        Ok(())
    }

    pub fn prescriptions_for(&self, patient_id: Uuid) -> Result<Vec<Prescription>, PatientError> {
        let all: Vec<Prescription> = read_or(self.store.as_ref(), keys::PRESCRIPTIONS, vec![])?;
        Ok(all
            .into_iter()
            .filter(|p| p.patient_id == patient_id)
            .collect())
    }

    pub fn issue_prescription(
        &self,
        patient_id: Uuid,
        date: NaiveDate,
        medications: Vec<Medication>,
    ) -> Result<Prescription, PatientError> {
        if medications.is_empty() {
            return Err(PatientError::ValidationError(
                "A prescription needs at least one medication".to_string(),
            ));
        }

        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id,
            medications,
            date,
        };

        let mut all: Vec<Prescription> =
            read_or(self.store.as_ref(), keys::PRESCRIPTIONS, vec![])?;
        all.push(prescription.clone());
        write(self.store.as_ref(), keys::PRESCRIPTIONS, &all)?;
        Ok(prescription)
    }
}

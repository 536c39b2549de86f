use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{CreatePatientRequest, Patient, PatientError, UpdatePatientRequest};

pub struct PatientService {
    store: Arc<dyn KeyValueStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Patient>, PatientError> {
        Ok(read_or(self.store.as_ref(), keys::PATIENTS, vec![])?)
    }

    pub fn get(&self, id: Uuid) -> Result<Patient, PatientError> {
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(PatientError::NotFound)
    }

    /// Create a patient with the next sequential clinic file number.
    pub fn create(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        if request.full_name.trim().is_empty() {
            return Err(PatientError::ValidationError(
                "Patient name must not be empty".to_string(),
            ));
        }

        let mut patients = self.list()?;
        let file_no = patients.iter().map(|p| p.file_no).max().unwrap_or(0) + 1;

        let patient = Patient {
            id: Uuid::new_v4(),
            file_no,
            full_name: request.full_name,
            phone: request.phone,
            country_code: request.country_code,
            gender: request.gender,
            birth_year: request.birth_year,
            birth_date: request.birth_date,
            address: request.address,
            medical_history: request.medical_history,
            distinct_mark: request.distinct_mark,
            tags: request.tags,
            created_by: request.created_by,
            created_at: Utc::now(),
        };

        patients.push(patient.clone());
        write(self.store.as_ref(), keys::PATIENTS, &patients)?;

        debug!("Patient created: file_no={} id={}", patient.file_no, patient.id);
        Ok(patient)
    }

    pub fn update(&self, id: Uuid, request: UpdatePatientRequest) -> Result<Patient, PatientError> {
        let mut patients = self.list()?;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PatientError::NotFound)?;

        if let Some(full_name) = request.full_name {
            patient.full_name = full_name;
        }
        if let Some(phone) = request.phone {
            patient.phone = phone;
        }
        if let Some(country_code) = request.country_code {
            patient.country_code = country_code;
        }
        if let Some(birth_year) = request.birth_year {
            patient.birth_year = birth_year;
        }
        if let Some(birth_date) = request.birth_date {
            patient.birth_date = Some(birth_date);
        }
        if let Some(address) = request.address {
            patient.address = address;
        }
        if let Some(medical_history) = request.medical_history {
            patient.medical_history = medical_history;
        }
        if let Some(distinct_mark) = request.distinct_mark {
            patient.distinct_mark = distinct_mark;
        }
        if let Some(tags) = request.tags {
            patient.tags = tags;
        }

        let updated = patient.clone();
        write(self.store.as_ref(), keys::PATIENTS, &patients)?;
        Ok(updated)
    }

    /// Substring search over full name and phone.
    pub fn search(&self, query: &str) -> Result<Vec<Patient>, PatientError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list();
        }
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.full_name.contains(query) || p.phone.contains(query))
            .collect())
    }
}

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{CreateDoctorRequest, Doctor, DoctorError, UpdateDoctorRequest};

pub struct DoctorService {
    store: Arc<dyn KeyValueStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All doctors, owner first, then by name.
    pub fn list(&self) -> Result<Vec<Doctor>, DoctorError> {
        let mut doctors: Vec<Doctor> = read_or(self.store.as_ref(), keys::DOCTORS, vec![])?;
        doctors.sort_by(|a, b| b.is_owner.cmp(&a.is_owner).then_with(|| a.name.cmp(&b.name)));
        Ok(doctors)
    }

    /// Doctors eligible for new appointments and treatments.
    pub fn list_active(&self) -> Result<Vec<Doctor>, DoctorError> {
        Ok(self.list()?.into_iter().filter(|d| d.is_active).collect())
    }

    pub fn get(&self, id: Uuid) -> Result<Doctor, DoctorError> {
        self.list()?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(DoctorError::NotFound)
    }

    pub fn create(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        if request.name.trim().is_empty() {
            return Err(DoctorError::ValidationError(
                "Doctor name must not be empty".to_string(),
            ));
        }

        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: request.name,
            specialty: request.specialty,
            phone: request.phone,
            is_owner: false,
            is_active: true,
        };

        let mut doctors: Vec<Doctor> = read_or(self.store.as_ref(), keys::DOCTORS, vec![])?;
        doctors.push(doctor.clone());
        write(self.store.as_ref(), keys::DOCTORS, &doctors)?;

        debug!("Doctor created with ID: {}", doctor.id);
        Ok(doctor)
    }

    pub fn update(&self, id: Uuid, request: UpdateDoctorRequest) -> Result<Doctor, DoctorError> {
        let mut doctors: Vec<Doctor> = read_or(self.store.as_ref(), keys::DOCTORS, vec![])?;
        let doctor = doctors
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(DoctorError::NotFound)?;

        if doctor.is_owner && request.is_active == Some(false) {
            return Err(DoctorError::OwnerImmutable);
        }

        if let Some(name) = request.name {
            doctor.name = name;
        }
        if let Some(specialty) = request.specialty {
            doctor.specialty = specialty;
        }
        if let Some(phone) = request.phone {
            doctor.phone = phone;
        }
        if let Some(is_active) = request.is_active {
            doctor.is_active = is_active;
        }

        let updated = doctor.clone();
        write(self.store.as_ref(), keys::DOCTORS, &doctors)?;
        Ok(updated)
    }
}

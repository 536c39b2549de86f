use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use billing_cell::ExpenseService;
use doctor_cell::Doctor;
use lab_cell::LabService;
use scheduling_cell::{AppointmentService, ClinicSettings};
use shared_storage::{keys, write, KeyValueStore};
use treatment_cell::CatalogService;

/// Bring a fresh data directory up to a usable state. Every step checks for
/// existing data first, so running this against a populated store is a no-op.
pub fn seed(store: Arc<dyn KeyValueStore>) -> Result<()> {
    // Empty collections, so later reads never hit the corrupt-data path.
    for key in keys::EMPTY_ARRAY_KEYS {
        if !store.contains(key)? {
            write(store.as_ref(), key, &Vec::<serde_json::Value>::new())?;
        }
    }

    if !store.contains(keys::CLINIC_SETTINGS)? {
        let scheduling = AppointmentService::new(store.clone());
        scheduling.save_settings(&ClinicSettings::default())?;
        info!("Seeded default clinic settings");
    }

    CatalogService::new(store.clone()).seed_defaults()?;
    LabService::new(store.clone()).seed_default_work_types()?;
    ExpenseService::new(store.clone()).seed_default_types()?;
    seed_owner_doctor(store)?;

    Ok(())
}

/// The clinic owner always exists as a doctor record and cannot be
/// deactivated later.
fn seed_owner_doctor(store: Arc<dyn KeyValueStore>) -> Result<()> {
    let doctors: Vec<Doctor> = shared_storage::read_or(store.as_ref(), keys::DOCTORS, vec![])?;
    if doctors.iter().any(|d| d.is_owner) {
        return Ok(());
    }
    let mut doctors = doctors;
    doctors.push(Doctor {
        id: Uuid::new_v4(),
        name: "د. صاحب العيادة".to_string(),
        specialty: "طب الأسنان".to_string(),
        phone: String::new(),
        is_owner: true,
        is_active: true,
    });
    write(store.as_ref(), keys::DOCTORS, &doctors)?;
    info!("Seeded owner doctor record");
    Ok(())
}

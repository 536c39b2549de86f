use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{Lab, LabError, LabWorkType};

/// Work types seeded on first run.
pub const DEFAULT_WORK_TYPES: [(&str, f64); 5] = [
    ("تاج زركون", 0.0),
    ("جسر بورسلين", 0.0),
    ("طقم كامل", 0.0),
    ("تقويم متحرك", 0.0),
    ("واقي أسنان", 0.0),
];

pub struct LabService {
    store: Arc<dyn KeyValueStore>,
}

impl LabService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ==========================================================================
    // LABS
    // ==========================================================================

    pub fn list(&self) -> Result<Vec<Lab>, LabError> {
        Ok(read_or(self.store.as_ref(), keys::LABS, vec![])?)
    }

    pub fn get(&self, id: Uuid) -> Result<Lab, LabError> {
        self.list()?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or(LabError::LabNotFound)
    }

    pub fn create(&self, name: &str, phone: &str, address: &str, notes: &str) -> Result<Lab, LabError> {
        if name.trim().is_empty() {
            return Err(LabError::ValidationError(
                "Lab name must not be empty".to_string(),
            ));
        }
        let lab = Lab {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            notes: notes.to_string(),
            created_at: Utc::now(),
        };
        let mut labs = self.list()?;
        labs.push(lab.clone());
        write(self.store.as_ref(), keys::LABS, &labs)?;
        debug!("Lab '{}' registered", lab.name);
        Ok(lab)
    }

    pub fn update(&self, lab: Lab) -> Result<Lab, LabError> {
        let mut labs = self.list()?;
        let slot = labs
            .iter_mut()
            .find(|l| l.id == lab.id)
            .ok_or(LabError::LabNotFound)?;
        *slot = lab.clone();
        write(self.store.as_ref(), keys::LABS, &labs)?;
        Ok(lab)
    }

    // ==========================================================================
    // WORK TYPES
    // ==========================================================================

    pub fn work_types(&self) -> Result<Vec<LabWorkType>, LabError> {
        Ok(read_or(self.store.as_ref(), keys::LAB_WORK_TYPES, vec![])?)
    }

    /// Write the default work types unless the key already holds data.
    pub fn seed_default_work_types(&self) -> Result<(), LabError> {
        if self.store.contains(keys::LAB_WORK_TYPES)? {
            return Ok(());
        }
        let types: Vec<LabWorkType> = DEFAULT_WORK_TYPES
            .iter()
            .map(|(name, cost)| LabWorkType {
                id: Uuid::new_v4(),
                name: name.to_string(),
                default_cost: *cost,
            })
            .collect();
        write(self.store.as_ref(), keys::LAB_WORK_TYPES, &types)?;
        debug!("Seeded {} default lab work types", types.len());
        Ok(())
    }

    pub fn add_work_type(&self, name: &str, default_cost: f64) -> Result<LabWorkType, LabError> {
        if name.trim().is_empty() {
            return Err(LabError::ValidationError(
                "Work type name must not be empty".to_string(),
            ));
        }
        if default_cost < 0.0 {
            return Err(LabError::ValidationError(
                "Default cost must not be negative".to_string(),
            ));
        }
        let work_type = LabWorkType {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            default_cost,
        };
        let mut types = self.work_types()?;
        types.push(work_type.clone());
        write(self.store.as_ref(), keys::LAB_WORK_TYPES, &types)?;
        Ok(work_type)
    }
}

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{
    default_treatment_groups, Treatment, TreatmentEffect, TreatmentError, TreatmentGroup,
};

/// Clinic-wide catalog of treatment groups and their priced treatments.
pub struct CatalogService {
    store: Arc<dyn KeyValueStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn groups(&self) -> Result<Vec<TreatmentGroup>, TreatmentError> {
        Ok(read_or(self.store.as_ref(), keys::TREATMENT_GROUPS, vec![])?)
    }

    pub fn group(&self, id: Uuid) -> Result<TreatmentGroup, TreatmentError> {
        self.groups()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or(TreatmentError::GroupNotFound)
    }

    /// Seed the system groups when the catalog key is empty.
    pub fn seed_defaults(&self) -> Result<(), TreatmentError> {
        if !self.store.contains(keys::TREATMENT_GROUPS)? {
            let groups = default_treatment_groups();
            write(self.store.as_ref(), keys::TREATMENT_GROUPS, &groups)?;
            debug!("Seeded {} system treatment groups", groups.len());
        }
        Ok(())
    }

    pub fn add_group(
        &self,
        code: String,
        name_ar: String,
        name_en: String,
        effect: TreatmentEffect,
    ) -> Result<TreatmentGroup, TreatmentError> {
        if code.trim().is_empty() {
            return Err(TreatmentError::ValidationError(
                "Group code must not be empty".to_string(),
            ));
        }

        let group = TreatmentGroup {
            id: Uuid::new_v4(),
            code,
            name_ar,
            name_en,
            effect,
            is_system: false,
            treatments: vec![],
        };

        let mut groups = self.groups()?;
        groups.push(group.clone());
        write(self.store.as_ref(), keys::TREATMENT_GROUPS, &groups)?;
        Ok(group)
    }

    pub fn remove_group(&self, id: Uuid) -> Result<(), TreatmentError> {
        let mut groups = self.groups()?;
        let group = groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(TreatmentError::GroupNotFound)?;
        if group.is_system {
            return Err(TreatmentError::SystemGroupImmutable);
        }
        groups.retain(|g| g.id != id);
        write(self.store.as_ref(), keys::TREATMENT_GROUPS, &groups)?;
        Ok(())
    }

    pub fn add_treatment(
        &self,
        group_id: Uuid,
        code: String,
        name: String,
        price: f64,
    ) -> Result<Treatment, TreatmentError> {
        if price < 0.0 {
            return Err(TreatmentError::ValidationError(
                "Price must not be negative".to_string(),
            ));
        }

        let mut groups = self.groups()?;
        let group = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(TreatmentError::GroupNotFound)?;

        let treatment = Treatment {
            id: Uuid::new_v4(),
            code,
            name,
            price,
        };
        group.treatments.push(treatment.clone());
        write(self.store.as_ref(), keys::TREATMENT_GROUPS, &groups)?;
        Ok(treatment)
    }

    /// Look up a treatment and its owning group.
    pub fn find_treatment(
        &self,
        treatment_id: Uuid,
    ) -> Result<(TreatmentGroup, Treatment), TreatmentError> {
        for group in self.groups()? {
            if let Some(t) = group.treatments.iter().find(|t| t.id == treatment_id) {
                let t = t.clone();
                return Ok((group, t));
            }
        }
        Err(TreatmentError::NotFound)
    }
}

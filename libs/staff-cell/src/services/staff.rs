use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_storage::{keys, read_or, write, KeyValueStore};

use crate::models::{Staff, StaffError, StaffRole, PERMISSION_KEYS};

pub struct CreateStaffRequest {
    pub name: String,
    pub phone: String,
    pub role: StaffRole,
    pub doctor_id: Option<Uuid>,
    pub has_login: bool,
    pub permissions: Vec<String>,
}

pub struct StaffService {
    store: Arc<dyn KeyValueStore>,
}

impl StaffService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Staff>, StaffError> {
        Ok(read_or(self.store.as_ref(), keys::STAFF, vec![])?)
    }

    pub fn get(&self, id: Uuid) -> Result<Staff, StaffError> {
        self.list()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(StaffError::NotFound)
    }

    pub fn create(&self, request: CreateStaffRequest) -> Result<Staff, StaffError> {
        if request.name.trim().is_empty() {
            return Err(StaffError::ValidationError(
                "Staff name must not be empty".to_string(),
            ));
        }
        let permissions = sanitize_permissions(request.permissions)?;

        let member = Staff {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            phone: request.phone,
            role: request.role,
            doctor_id: request.doctor_id,
            is_active: true,
            has_login: request.has_login,
            permissions,
            created_at: Utc::now(),
        };
        let mut staff = self.list()?;
        staff.push(member.clone());
        write(self.store.as_ref(), keys::STAFF, &staff)?;
        debug!("Staff member '{}' added", member.name);
        Ok(member)
    }

    pub fn set_active(&self, id: Uuid, is_active: bool) -> Result<Staff, StaffError> {
        self.mutate(id, |member| {
            member.is_active = is_active;
            Ok(())
        })
    }

    pub fn set_permissions(&self, id: Uuid, permissions: Vec<String>) -> Result<Staff, StaffError> {
        let permissions = sanitize_permissions(permissions)?;
        self.mutate(id, move |member| {
            member.permissions = permissions.clone();
            Ok(())
        })
    }

    pub fn set_login(&self, id: Uuid, has_login: bool) -> Result<Staff, StaffError> {
        self.mutate(id, |member| {
            member.has_login = has_login;
            Ok(())
        })
    }

    fn mutate<F>(&self, id: Uuid, apply: F) -> Result<Staff, StaffError>
    where
        F: Fn(&mut Staff) -> Result<(), StaffError>,
    {
        let mut staff = self.list()?;
        let member = staff
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StaffError::NotFound)?;
        apply(member)?;
        let updated = member.clone();
        write(self.store.as_ref(), keys::STAFF, &staff)?;
        Ok(updated)
    }
}

fn sanitize_permissions(permissions: Vec<String>) -> Result<Vec<String>, StaffError> {
    for key in &permissions {
        if !PERMISSION_KEYS.contains(&key.as_str()) {
            return Err(StaffError::ValidationError(format!(
                "Unknown permission key '{key}'"
            )));
        }
    }
    Ok(permissions)
}

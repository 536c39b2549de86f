use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_storage::{keys, write, KeyValueStore};

use crate::models::{AuthSession, SessionRole, StaffError};
use crate::services::staff::StaffService;

/// Sign-in and permission checks. A single session record is kept in the
/// store; signing in replaces whatever session was there.
pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
    staff: StaffService,
}

impl AuthService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            staff: StaffService::new(store.clone()),
            store,
        }
    }

    pub fn session(&self) -> Result<Option<AuthSession>, StaffError> {
        let raw = self.store.get_raw(keys::AUTH_SESSION)?;
        match raw {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    warn!("Discarding unreadable session record: {}", e);
                    Ok(None)
                }
            },
        }
    }

    /// The owner account always exists and holds every permission.
    pub fn sign_in_owner(&self, name: &str) -> Result<AuthSession, StaffError> {
        let session = AuthSession {
            role: SessionRole::Owner,
            staff_id: None,
            staff_name: name.to_string(),
            permissions: vec![],
            signed_in_at: Utc::now(),
        };
        write(self.store.as_ref(), keys::AUTH_SESSION, &session)?;
        debug!("Owner session opened");
        Ok(session)
    }

    /// Nurses must be active and have login enabled.
    pub fn sign_in_nurse(&self, staff_id: Uuid) -> Result<AuthSession, StaffError> {
        let member = self.staff.get(staff_id)?;
        if !member.is_active || !member.has_login {
            return Err(StaffError::LoginNotAllowed);
        }
        let session = AuthSession {
            role: SessionRole::Nurse,
            staff_id: Some(member.id),
            staff_name: member.name.clone(),
            permissions: member.permissions.clone(),
            signed_in_at: Utc::now(),
        };
        write(self.store.as_ref(), keys::AUTH_SESSION, &session)?;
        debug!("Nurse session opened for '{}'", member.name);
        Ok(session)
    }

    pub fn sign_out(&self) -> Result<(), StaffError> {
        self.store.remove(keys::AUTH_SESSION)?;
        Ok(())
    }

    /// Whether the current session may open the named section. The dashboard
    /// is always allowed; owners pass every check.
    pub fn has_permission(&self, section: &str) -> Result<bool, StaffError> {
        if section == "dashboard" {
            return Ok(true);
        }
        let session = self.session()?.ok_or(StaffError::NotSignedIn)?;
        match session.role {
            SessionRole::Owner => Ok(true),
            SessionRole::Nurse => Ok(session.permissions.iter().any(|p| p == section)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StaffRole;
    use crate::services::staff::CreateStaffRequest;
    use assert_matches::assert_matches;
    use shared_storage::MemoryStore;

    struct Fixture {
        staff: StaffService,
        auth: AuthService,
    }

    impl Fixture {
        fn new() -> Self {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
            Self {
                staff: StaffService::new(store.clone()),
                auth: AuthService::new(store),
            }
        }

        fn nurse(&self, has_login: bool, permissions: &[&str]) -> Uuid {
            self.staff
                .create(CreateStaffRequest {
                    name: "ليلى".to_string(),
                    phone: String::new(),
                    role: StaffRole::Nurse,
                    doctor_id: None,
                    has_login,
                    permissions: permissions.iter().map(|s| s.to_string()).collect(),
                })
                .unwrap()
                .id
        }
    }

    #[test]
    fn test_owner_passes_every_check() {
        let fx = Fixture::new();
        fx.auth.sign_in_owner("د. أحمد").unwrap();
        for section in ["patients", "settings", "labs", "dashboard"] {
            assert!(fx.auth.has_permission(section).unwrap());
        }
    }

    #[test]
    fn test_nurse_limited_to_granted_sections() {
        let fx = Fixture::new();
        let id = fx.nurse(true, &["patients", "appointments"]);
        fx.auth.sign_in_nurse(id).unwrap();

        assert!(fx.auth.has_permission("patients").unwrap());
        assert!(fx.auth.has_permission("dashboard").unwrap());
        assert!(!fx.auth.has_permission("settings").unwrap());
    }

    #[test]
    fn test_inactive_or_loginless_nurse_refused() {
        let fx = Fixture::new();
        let no_login = fx.nurse(false, &[]);
        assert_matches!(
            fx.auth.sign_in_nurse(no_login),
            Err(StaffError::LoginNotAllowed)
        );

        let inactive = fx.nurse(true, &[]);
        fx.staff.set_active(inactive, false).unwrap();
        assert_matches!(
            fx.auth.sign_in_nurse(inactive),
            Err(StaffError::LoginNotAllowed)
        );
    }

    #[test]
    fn test_sign_out_clears_session() {
        let fx = Fixture::new();
        fx.auth.sign_in_owner("د. أحمد").unwrap();
        fx.auth.sign_out().unwrap();
        assert!(fx.auth.session().unwrap().is_none());
        assert_matches!(fx.auth.has_permission("patients"), Err(StaffError::NotSignedIn));
    }
}

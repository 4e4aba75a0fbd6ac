//! Staff account management.
//!
//! Accounts identify the people acting in the system: prescribers,
//! charting nurses, store keepers, and the super admin. Accounts are
//! deactivated rather than deleted so historical records keep a valid
//! reference.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::error::RecordResult;
use crate::store::RecordStore;
use hims_types::{EmailAddress, NonEmptyText};
use hims_uuid::RecordId;

/// Role of a staff account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    SuperAdmin,
    Doctor,
    Nurse,
    LabTechnician,
    Pharmacist,
    StoreKeeper,
}

/// A stored staff account.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StaffAccount {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub full_name: NonEmptyText,
    #[schema(value_type = String)]
    pub email: EmailAddress,
    pub role: StaffRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a staff account.
#[derive(Clone, Debug)]
pub struct NewStaffAccount {
    pub full_name: NonEmptyText,
    pub email: EmailAddress,
    pub role: StaffRole,
}

/// Service for staff account operations.
#[derive(Clone, Debug)]
pub struct StaffService {
    store: RecordStore,
}

impl StaffService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.staff_dir()),
        }
    }

    /// Creates an active account.
    ///
    /// Name and email are validated at the type level, so malformed
    /// values can never reach storage.
    pub fn create(&self, new: NewStaffAccount) -> RecordResult<StaffAccount> {
        self.store.create(|id| StaffAccount {
            id,
            full_name: new.full_name,
            email: new.email,
            role: new.role,
            active: true,
            created_at: Utc::now(),
        })
    }

    /// Fetches one account by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such account exists.
    pub fn fetch(&self, id: &RecordId) -> RecordResult<StaffAccount> {
        self.store.load(id)
    }

    /// Deactivates an account. Deactivating twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such account exists.
    pub fn deactivate(&self, id: &RecordId) -> RecordResult<StaffAccount> {
        let mut account: StaffAccount = self.store.load(id)?;
        if account.active {
            account.active = false;
            self.store.save(id, &account)?;
        }
        Ok(account)
    }

    /// Lists every account.
    pub fn list(&self) -> Vec<StaffAccount> {
        self.store.list()
    }

    /// Number of active accounts.
    pub fn active_count(&self) -> usize {
        self.list().iter().filter(|a| a.active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_cfg(data_dir: &Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(data_dir.to_path_buf(), "hims.test".into())
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn account(name: &str, email: &str, role: StaffRole) -> NewStaffAccount {
        NewStaffAccount {
            full_name: NonEmptyText::new(name).unwrap(),
            email: EmailAddress::parse(email).unwrap(),
            role,
        }
    }

    #[test]
    fn test_create_and_fetch_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = StaffService::new(test_cfg(temp_dir.path()));

        let created = service
            .create(account("Dr Shah", "shah@hospital.example", StaffRole::Doctor))
            .expect("create should succeed");

        let fetched = service.fetch(&created.id).expect("fetch should succeed");
        assert_eq!(fetched.email.as_str(), "shah@hospital.example");
        assert_eq!(fetched.role, StaffRole::Doctor);
        assert!(fetched.active);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = StaffService::new(test_cfg(temp_dir.path()));

        let created = service
            .create(account("Store Keeper", "stores@hospital.example", StaffRole::StoreKeeper))
            .expect("create should succeed");

        assert_eq!(service.active_count(), 1);

        let first = service
            .deactivate(&created.id)
            .expect("deactivate should succeed");
        let second = service
            .deactivate(&created.id)
            .expect("second deactivate should succeed");
        assert!(!first.active && !second.active);
        assert_eq!(service.active_count(), 0);
    }

    #[test]
    fn test_fetch_unknown_account_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = StaffService::new(test_cfg(temp_dir.path()));

        let err = service
            .fetch(&RecordId::generate())
            .expect_err("unknown account should not fetch");
        assert!(matches!(err, crate::RecordError::NotFound(_)));
    }
}

//! Patient record management.
//!
//! Patients are the root record family: prescriptions, ICU chart entries,
//! and blood issues all reference a patient identifier and validate it
//! against this section before writing.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blood_bank::BloodGroup;
use crate::config::CoreConfig;
use crate::error::RecordResult;
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// Administrative sex marker on a patient record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
    Other,
}

/// A stored patient record.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub first_name: NonEmptyText,
    #[schema(value_type = String)]
    pub last_name: NonEmptyText,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Input for registering a patient.
#[derive(Clone, Debug)]
pub struct NewPatient {
    pub first_name: NonEmptyText,
    pub last_name: NonEmptyText,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Partial update of a patient's demographics.
///
/// A `Some` field replaces the stored value; `None` leaves it untouched.
#[derive(Clone, Debug, Default)]
pub struct PatientUpdate {
    pub first_name: Option<NonEmptyText>,
    pub last_name: Option<NonEmptyText>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Service for patient record operations.
#[derive(Clone, Debug)]
pub struct PatientService {
    store: RecordStore,
}

impl PatientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.patients_dir()),
        }
    }

    /// Registers a new patient.
    ///
    /// Name fields are validated at the type level (`NonEmptyText`), so a
    /// blank first or last name can never reach storage.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if record allocation or the write fails.
    pub fn register(&self, new: NewPatient) -> RecordResult<PatientRecord> {
        self.store.create(|id| PatientRecord {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            birth_date: new.birth_date,
            sex: new.sex,
            blood_group: new.blood_group,
            phone: new.phone,
            address: new.address,
            registered_at: Utc::now(),
        })
    }

    /// Fetches one patient by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such patient exists.
    pub fn fetch(&self, id: &RecordId) -> RecordResult<PatientRecord> {
        self.store.load(id)
    }

    /// Applies a partial demographics update and returns the new record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such patient exists.
    pub fn update(&self, id: &RecordId, update: PatientUpdate) -> RecordResult<PatientRecord> {
        let mut record: PatientRecord = self.store.load(id)?;

        if let Some(first_name) = update.first_name {
            record.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            record.last_name = last_name;
        }
        if let Some(birth_date) = update.birth_date {
            record.birth_date = Some(birth_date);
        }
        if let Some(sex) = update.sex {
            record.sex = Some(sex);
        }
        if let Some(blood_group) = update.blood_group {
            record.blood_group = Some(blood_group);
        }
        if let Some(phone) = update.phone {
            record.phone = Some(phone);
        }
        if let Some(address) = update.address {
            record.address = Some(address);
        }

        self.store.save(id, &record)?;
        Ok(record)
    }

    /// Lists all patients.
    pub fn list(&self) -> Vec<PatientRecord> {
        self.store.list()
    }

    /// Case-insensitive substring search over the combined patient name.
    pub fn search(&self, query: &str) -> Vec<PatientRecord> {
        let needle = query.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|p| {
                format!("{} {}", p.first_name, p.last_name)
                    .to_lowercase()
                    .contains(&needle)
            })
            .collect()
    }

    /// Number of registered patients.
    pub fn count(&self) -> usize {
        self.store.count::<PatientRecord>()
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

    fn new_patient(first: &str, last: &str) -> NewPatient {
        NewPatient {
            first_name: NonEmptyText::new(first).unwrap(),
            last_name: NonEmptyText::new(last).unwrap(),
            birth_date: NaiveDate::from_ymd_opt(1988, 4, 2),
            sex: Some(Sex::Female),
            blood_group: Some(BloodGroup::OPositive),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn test_register_and_fetch_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let created = service
            .register(new_patient("Amara", "Okafor"))
            .expect("register should succeed");

        let fetched = service.fetch(&created.id).expect("fetch should succeed");
        assert_eq!(fetched.first_name.as_str(), "Amara");
        assert_eq!(fetched.last_name.as_str(), "Okafor");
        assert_eq!(fetched.blood_group, Some(BloodGroup::OPositive));
    }

    #[test]
    fn test_fetch_unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let err = service
            .fetch(&RecordId::generate())
            .expect_err("unknown patient should not fetch");
        assert!(matches!(err, crate::RecordError::NotFound(_)));
    }

    #[test]
    fn test_update_replaces_only_supplied_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        let created = service
            .register(new_patient("Amara", "Okafor"))
            .expect("register should succeed");

        let updated = service
            .update(
                &created.id,
                PatientUpdate {
                    phone: Some("020 7946 0000".into()),
                    ..PatientUpdate::default()
                },
            )
            .expect("update should succeed");

        assert_eq!(updated.phone.as_deref(), Some("020 7946 0000"));
        assert_eq!(updated.first_name.as_str(), "Amara");
        assert_eq!(updated.birth_date, created.birth_date);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PatientService::new(test_cfg(temp_dir.path()));

        service
            .register(new_patient("Amara", "Okafor"))
            .expect("register should succeed");
        service
            .register(new_patient("Benedict", "Shaw"))
            .expect("register should succeed");

        let hits = service.search("okaf");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name.as_str(), "Okafor");

        let all = service.search("  ");
        assert_eq!(all.len(), 2, "blank query should match everyone");

        assert!(service.search("zz").is_empty());
    }
}

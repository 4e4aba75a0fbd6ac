//! Blood bank inventory.
//!
//! Each donation is tracked as an individual unit with a shelf life of 42
//! days from collection. Issuing picks the oldest compatible unit first
//! so stock rotates; expired units are discarded, never issued.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use crate::patients::PatientService;
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// Shelf life of a whole-blood unit, in days from collection.
pub const SHELF_LIFE_DAYS: i64 = 42;

/// ABO/Rh blood group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups, in display order.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a blood unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Available,
    Issued,
    Discarded,
}

/// A single donated unit of blood.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BloodUnit {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub blood_group: BloodGroup,
    #[schema(value_type = String)]
    pub donor_name: NonEmptyText,
    pub collected_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub status: UnitStatus,
    #[schema(value_type = Option<String>)]
    pub issued_to: Option<RecordId>,
}

/// Available-unit count for one blood group.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct StockLevel {
    pub blood_group: BloodGroup,
    pub available: usize,
}

/// Service for blood bank operations.
#[derive(Clone, Debug)]
pub struct BloodBankService {
    cfg: Arc<CoreConfig>,
    store: RecordStore,
}

impl BloodBankService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = RecordStore::new(cfg.blood_bank_dir());
        Self { cfg, store }
    }

    /// Records a donation as a new available unit.
    ///
    /// The expiry date is derived from the collection date plus the fixed
    /// shelf life.
    pub fn record_donation(
        &self,
        donor_name: NonEmptyText,
        blood_group: BloodGroup,
        collected_on: NaiveDate,
    ) -> RecordResult<BloodUnit> {
        self.store.create(|id| BloodUnit {
            id,
            blood_group,
            donor_name,
            collected_on,
            expires_on: collected_on + Duration::days(SHELF_LIFE_DAYS),
            status: UnitStatus::Available,
            issued_to: None,
        })
    }

    /// Issues the oldest available, unexpired unit of `blood_group` to a
    /// patient.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the patient does not exist, and
    /// `RecordError::InvalidInput` if no unit of the group is in stock.
    pub fn issue(
        &self,
        blood_group: BloodGroup,
        patient_id: &RecordId,
        today: NaiveDate,
    ) -> RecordResult<BloodUnit> {
        // The patient must exist before a unit is committed to them.
        PatientService::new(self.cfg.clone()).fetch(patient_id)?;

        let mut candidates: Vec<BloodUnit> = self
            .store
            .list::<BloodUnit>()
            .into_iter()
            .filter(|u| {
                u.blood_group == blood_group
                    && u.status == UnitStatus::Available
                    && u.expires_on >= today
            })
            .collect();
        candidates.sort_by_key(|u| u.collected_on);

        let mut unit = candidates.into_iter().next().ok_or_else(|| {
            RecordError::InvalidInput(format!("no {} units in stock", blood_group))
        })?;

        unit.status = UnitStatus::Issued;
        unit.issued_to = Some(*patient_id);
        self.store.save(&unit.id, &unit)?;

        Ok(unit)
    }

    /// Marks every expired available unit as discarded and returns them.
    pub fn discard_expired(&self, today: NaiveDate) -> RecordResult<Vec<BloodUnit>> {
        let mut discarded = Vec::new();

        for mut unit in self.store.list::<BloodUnit>() {
            if unit.status == UnitStatus::Available && unit.expires_on < today {
                unit.status = UnitStatus::Discarded;
                self.store.save(&unit.id, &unit)?;
                discarded.push(unit);
            }
        }

        Ok(discarded)
    }

    /// Available-unit counts for every blood group (zeroes included).
    pub fn stock_levels(&self) -> Vec<StockLevel> {
        let units = self.store.list::<BloodUnit>();
        BloodGroup::ALL
            .into_iter()
            .map(|blood_group| StockLevel {
                blood_group,
                available: units
                    .iter()
                    .filter(|u| u.blood_group == blood_group && u.status == UnitStatus::Available)
                    .count(),
            })
            .collect()
    }

    /// Total count of available units across all groups.
    pub fn available_total(&self) -> usize {
        self.stock_levels().iter().map(|s| s.available).sum()
    }

    /// Lists every unit in the bank.
    pub fn list(&self) -> Vec<BloodUnit> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patients::{NewPatient, PatientService};
    use std::path::Path;
    use tempfile::TempDir;

    fn test_cfg(data_dir: &Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(data_dir.to_path_buf(), "hims.test".into())
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn register_patient(cfg: Arc<CoreConfig>) -> RecordId {
        PatientService::new(cfg)
            .register(NewPatient {
                first_name: NonEmptyText::new("Test").unwrap(),
                last_name: NonEmptyText::new("Patient").unwrap(),
                birth_date: None,
                sex: None,
                blood_group: None,
                phone: None,
                address: None,
            })
            .expect("register should succeed")
            .id
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_donation_expiry_is_42_days_after_collection() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = BloodBankService::new(test_cfg(temp_dir.path()));

        let unit = service
            .record_donation(
                NonEmptyText::new("Donor One").unwrap(),
                BloodGroup::APositive,
                date(2026, 1, 1),
            )
            .expect("donation should succeed");

        assert_eq!(unit.expires_on, date(2026, 2, 12));
        assert_eq!(unit.status, UnitStatus::Available);
    }

    #[test]
    fn test_issue_picks_oldest_available_unit() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = BloodBankService::new(cfg.clone());
        let patient_id = register_patient(cfg);

        let newer = service
            .record_donation(
                NonEmptyText::new("Donor A").unwrap(),
                BloodGroup::ONegative,
                date(2026, 7, 20),
            )
            .expect("donation should succeed");
        let older = service
            .record_donation(
                NonEmptyText::new("Donor B").unwrap(),
                BloodGroup::ONegative,
                date(2026, 7, 1),
            )
            .expect("donation should succeed");

        let issued = service
            .issue(BloodGroup::ONegative, &patient_id, date(2026, 8, 1))
            .expect("issue should succeed");

        assert_eq!(issued.id, older.id, "oldest unit should be issued first");
        assert_eq!(issued.status, UnitStatus::Issued);
        assert_eq!(issued.issued_to, Some(patient_id));

        let remaining: BloodUnit = service
            .list()
            .into_iter()
            .find(|u| u.id == newer.id)
            .expect("newer unit still present");
        assert_eq!(remaining.status, UnitStatus::Available);
    }

    #[test]
    fn test_issue_skips_expired_units_and_errors_when_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = BloodBankService::new(cfg.clone());
        let patient_id = register_patient(cfg);

        service
            .record_donation(
                NonEmptyText::new("Donor").unwrap(),
                BloodGroup::BNegative,
                date(2026, 1, 1),
            )
            .expect("donation should succeed");

        // 2026-02-12 expiry is long past by August.
        let err = service
            .issue(BloodGroup::BNegative, &patient_id, date(2026, 8, 1))
            .expect_err("expired stock should not issue");
        assert!(matches!(err, RecordError::InvalidInput(msg) if msg.contains("B-")));
    }

    #[test]
    fn test_issue_to_unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = BloodBankService::new(test_cfg(temp_dir.path()));

        service
            .record_donation(
                NonEmptyText::new("Donor").unwrap(),
                BloodGroup::OPositive,
                date(2026, 8, 1),
            )
            .expect("donation should succeed");

        let err = service
            .issue(BloodGroup::OPositive, &RecordId::generate(), date(2026, 8, 2))
            .expect_err("unknown patient should not receive blood");
        assert!(matches!(err, RecordError::NotFound(_)));
    }

    #[test]
    fn test_discard_expired_marks_only_stale_available_units() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = BloodBankService::new(test_cfg(temp_dir.path()));

        service
            .record_donation(
                NonEmptyText::new("Old Donor").unwrap(),
                BloodGroup::APositive,
                date(2026, 1, 1),
            )
            .expect("donation should succeed");
        let fresh = service
            .record_donation(
                NonEmptyText::new("Fresh Donor").unwrap(),
                BloodGroup::APositive,
                date(2026, 7, 30),
            )
            .expect("donation should succeed");

        let discarded = service
            .discard_expired(date(2026, 8, 6))
            .expect("discard should succeed");

        assert_eq!(discarded.len(), 1);
        assert_eq!(discarded[0].status, UnitStatus::Discarded);
        assert_ne!(discarded[0].id, fresh.id);

        let levels = service.stock_levels();
        let a_pos = levels
            .iter()
            .find(|s| s.blood_group == BloodGroup::APositive)
            .expect("A+ level present");
        assert_eq!(a_pos.available, 1);
    }

    #[test]
    fn test_stock_levels_cover_every_group() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = BloodBankService::new(test_cfg(temp_dir.path()));

        let levels = service.stock_levels();
        assert_eq!(levels.len(), 8);
        assert!(levels.iter().all(|s| s.available == 0));
        assert_eq!(service.available_total(), 0);
    }
}

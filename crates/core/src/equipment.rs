//! Equipment servicing records.
//!
//! Every piece of equipment carries a maintenance cadence and a next due
//! date. The due date is derived from the last service date wherever one
//! is known (`scheduling::next_due_date`); equipment migrated from paper
//! records may instead carry a manually supplied due date until its first
//! recorded service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use crate::scheduling::{self, ServiceFrequency, ServiceStatus};
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// A stored equipment record.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EquipmentRecord {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    #[schema(value_type = String)]
    pub department: NonEmptyText,
    pub serial_number: Option<String>,
    pub last_service_date: Option<NaiveDate>,
    pub service_frequency: ServiceFrequency,
    pub next_due_date: NaiveDate,
    pub notes: Option<String>,
}

/// Input for registering equipment.
///
/// At least one of `last_service_date` / `next_due_date` must be present;
/// when both are, the date computed from `last_service_date` wins.
#[derive(Clone, Debug)]
pub struct NewEquipment {
    pub name: NonEmptyText,
    pub department: NonEmptyText,
    pub serial_number: Option<String>,
    pub service_frequency: ServiceFrequency,
    pub last_service_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// An equipment record with its derived status.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EquipmentStatusView {
    pub equipment: EquipmentRecord,
    pub status: ServiceStatus,
    pub days_until_due: i64,
}

/// Service for equipment operations.
#[derive(Clone, Debug)]
pub struct EquipmentService {
    store: RecordStore,
}

impl EquipmentService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.equipment_dir()),
        }
    }

    /// Registers a piece of equipment.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidInput` when neither a last service
    /// date nor a manual next due date is supplied; without either there
    /// is nothing to schedule from.
    pub fn register(&self, new: NewEquipment) -> RecordResult<EquipmentRecord> {
        let next_due_date = match (new.last_service_date, new.next_due_date) {
            (Some(last), _) => scheduling::next_due_date(last, new.service_frequency),
            (None, Some(manual)) => manual,
            (None, None) => {
                return Err(RecordError::InvalidInput(
                    "either last_service_date or next_due_date is required".into(),
                ));
            }
        };

        self.store.create(|id| EquipmentRecord {
            id,
            name: new.name,
            department: new.department,
            serial_number: new.serial_number,
            last_service_date: new.last_service_date,
            service_frequency: new.service_frequency,
            next_due_date,
            notes: new.notes,
        })
    }

    /// Fetches one equipment record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such record exists.
    pub fn fetch(&self, id: &RecordId) -> RecordResult<EquipmentRecord> {
        self.store.load(id)
    }

    /// Records a completed service and recomputes the due date.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such record exists.
    pub fn record_service(
        &self,
        id: &RecordId,
        serviced_on: NaiveDate,
    ) -> RecordResult<EquipmentRecord> {
        let mut record: EquipmentRecord = self.store.load(id)?;

        record.last_service_date = Some(serviced_on);
        record.next_due_date = scheduling::next_due_date(serviced_on, record.service_frequency);

        self.store.save(id, &record)?;
        Ok(record)
    }

    /// Lists every record with its status derived against `today`.
    pub fn list_with_status(&self, today: NaiveDate) -> Vec<EquipmentStatusView> {
        self.store
            .list::<EquipmentRecord>()
            .into_iter()
            .map(|equipment| EquipmentStatusView {
                status: scheduling::classify(equipment.next_due_date, today),
                days_until_due: scheduling::days_until_due(equipment.next_due_date, today),
                equipment,
            })
            .collect()
    }

    /// Records due within `window_days` of `today` (overdue included),
    /// soonest first.
    pub fn due_within(&self, window_days: i64, today: NaiveDate) -> Vec<EquipmentStatusView> {
        let mut due: Vec<EquipmentStatusView> = self
            .list_with_status(today)
            .into_iter()
            .filter(|v| v.days_until_due <= window_days)
            .collect();
        due.sort_by_key(|v| v.days_until_due);
        due
    }

    /// Count of records in each derived status.
    pub fn status_counts(&self, today: NaiveDate) -> (usize, usize, usize) {
        let mut overdue = 0;
        let mut due_soon = 0;
        let mut up_to_date = 0;
        for view in self.list_with_status(today) {
            match view.status {
                ServiceStatus::Overdue => overdue += 1,
                ServiceStatus::DueSoon => due_soon += 1,
                ServiceStatus::UpToDate => up_to_date += 1,
            }
        }
        (overdue, due_soon, up_to_date)
    }

    /// Number of equipment records.
    pub fn count(&self) -> usize {
        self.store.count::<EquipmentRecord>()
    }
}

//! Prescription management.
//!
//! A prescription is a set of medicine orders for one patient. The
//! dispense quantity and daily schedule of every order are derived
//! server-side from the dosing rules (`dosing`); clients submit only the
//! raw frequency code and duration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::dosing::{self, DoseFrequency, DurationUnit};
use crate::error::{RecordError, RecordResult};
use crate::patients::PatientService;
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// One medicine line on a prescription, with derived dosing fields.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicineOrder {
    #[schema(value_type = String)]
    pub medicine: NonEmptyText,
    pub frequency: DoseFrequency,
    pub duration: u32,
    pub duration_unit: DurationUnit,
    /// Derived: `duration_in_days * times_per_day`.
    pub quantity: u32,
    /// Derived: the fixed daily schedule for the frequency.
    pub schedule: Vec<String>,
}

/// A stored prescription.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Prescription {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    #[schema(value_type = String)]
    pub prescriber: NonEmptyText,
    pub items: Vec<MedicineOrder>,
    pub notes: Option<String>,
    pub issued_at: DateTime<Utc>,
}

/// Raw input for one medicine order, as submitted by a form.
///
/// `frequency_code` and `duration` arrive as free text and parse with the
/// dosing fallbacks (unknown code = once daily, bad duration = 1).
#[derive(Clone, Debug)]
pub struct MedicineOrderInput {
    pub medicine: NonEmptyText,
    pub frequency_code: String,
    pub duration: String,
    pub duration_unit: DurationUnit,
}

/// Input for issuing a prescription.
#[derive(Clone, Debug)]
pub struct NewPrescription {
    pub patient_id: RecordId,
    pub prescriber: NonEmptyText,
    pub items: Vec<MedicineOrderInput>,
    pub notes: Option<String>,
}

/// Service for prescription operations.
#[derive(Clone, Debug)]
pub struct PrescriptionService {
    cfg: Arc<CoreConfig>,
    store: RecordStore,
}

impl PrescriptionService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = RecordStore::new(cfg.prescriptions_dir());
        Self { cfg, store }
    }

    /// Issues a prescription, deriving quantity and schedule per item.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the patient does not exist and
    /// `RecordError::InvalidInput` if no items were supplied.
    pub fn issue(&self, new: NewPrescription) -> RecordResult<Prescription> {
        if new.items.is_empty() {
            return Err(RecordError::InvalidInput(
                "prescription requires at least one medicine order".into(),
            ));
        }

        PatientService::new(self.cfg.clone()).fetch(&new.patient_id)?;

        let items = new.items.into_iter().map(build_order).collect();

        self.store.create(|id| Prescription {
            id,
            patient_id: new.patient_id,
            prescriber: new.prescriber,
            items,
            notes: new.notes,
            issued_at: Utc::now(),
        })
    }

    /// Fetches one prescription by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such prescription exists.
    pub fn fetch(&self, id: &RecordId) -> RecordResult<Prescription> {
        self.store.load(id)
    }

    /// Lists a patient's prescriptions, newest first.
    pub fn list_for_patient(&self, patient_id: &RecordId) -> Vec<Prescription> {
        let mut prescriptions: Vec<Prescription> = self
            .store
            .list::<Prescription>()
            .into_iter()
            .filter(|p| p.patient_id == *patient_id)
            .collect();
        prescriptions.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        prescriptions
    }

    /// Number of stored prescriptions.
    pub fn count(&self) -> usize {
        self.store.count::<Prescription>()
    }
}

fn build_order(input: MedicineOrderInput) -> MedicineOrder {
    let frequency = DoseFrequency::from_code(&input.frequency_code);
    let duration = dosing::duration_or_default(&input.duration);

    MedicineOrder {
        medicine: input.medicine,
        frequency,
        duration,
        duration_unit: input.duration_unit,
        quantity: dosing::quantity(frequency, duration, input.duration_unit),
        schedule: frequency.schedule().iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patients::NewPatient;
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

    fn order(medicine: &str, code: &str, duration: &str, unit: DurationUnit) -> MedicineOrderInput {
        MedicineOrderInput {
            medicine: NonEmptyText::new(medicine).unwrap(),
            frequency_code: code.into(),
            duration: duration.into(),
            duration_unit: unit,
        }
    }

    #[test]
    fn test_issue_derives_quantity_and_schedule() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PrescriptionService::new(cfg.clone());
        let patient_id = register_patient(cfg);

        let prescription = service
            .issue(NewPrescription {
                patient_id,
                prescriber: NonEmptyText::new("Dr Shah").unwrap(),
                items: vec![
                    order("Amoxicillin 500mg", "2", "5", DurationUnit::Days),
                    order("Vitamin D", "3", "2", DurationUnit::Weeks),
                ],
                notes: None,
            })
            .expect("issue should succeed");

        assert_eq!(prescription.items[0].quantity, 10);
        assert_eq!(prescription.items[0].schedule, ["Morning", "Night"]);
        assert_eq!(prescription.items[1].quantity, 42);
        assert_eq!(
            prescription.items[1].schedule,
            ["Morning", "Afternoon", "Night"]
        );
    }

    #[test]
    fn test_issue_applies_silent_fallbacks() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PrescriptionService::new(cfg.clone());
        let patient_id = register_patient(cfg);

        let prescription = service
            .issue(NewPrescription {
                patient_id,
                prescriber: NonEmptyText::new("Dr Shah").unwrap(),
                items: vec![order("Paracetamol", "bogus", "", DurationUnit::Days)],
                notes: None,
            })
            .expect("issue should succeed");

        // Unknown code -> once daily; blank duration -> 1 day.
        assert_eq!(prescription.items[0].frequency, DoseFrequency::OnceDaily);
        assert_eq!(prescription.items[0].duration, 1);
        assert_eq!(prescription.items[0].quantity, 1);
        assert_eq!(prescription.items[0].schedule, ["Morning"]);
    }

    #[test]
    fn test_issue_requires_items() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PrescriptionService::new(cfg.clone());
        let patient_id = register_patient(cfg);

        let err = service
            .issue(NewPrescription {
                patient_id,
                prescriber: NonEmptyText::new("Dr Shah").unwrap(),
                items: vec![],
                notes: None,
            })
            .expect_err("empty prescription should be rejected");
        assert!(matches!(err, RecordError::InvalidInput(msg) if msg.contains("medicine order")));
    }

    #[test]
    fn test_issue_for_unknown_patient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = PrescriptionService::new(test_cfg(temp_dir.path()));

        let err = service
            .issue(NewPrescription {
                patient_id: RecordId::generate(),
                prescriber: NonEmptyText::new("Dr Shah").unwrap(),
                items: vec![order("Ibuprofen", "1", "3", DurationUnit::Days)],
                notes: None,
            })
            .expect_err("unknown patient should be rejected");
        assert!(matches!(err, RecordError::NotFound(_)));
    }

    #[test]
    fn test_list_for_patient_filters_and_sorts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = PrescriptionService::new(cfg.clone());
        let patient_a = register_patient(cfg.clone());
        let patient_b = register_patient(cfg);

        for _ in 0..2 {
            service
                .issue(NewPrescription {
                    patient_id: patient_a,
                    prescriber: NonEmptyText::new("Dr Shah").unwrap(),
                    items: vec![order("Ibuprofen", "1", "3", DurationUnit::Days)],
                    notes: None,
                })
                .expect("issue should succeed");
        }
        service
            .issue(NewPrescription {
                patient_id: patient_b,
                prescriber: NonEmptyText::new("Dr Shah").unwrap(),
                items: vec![order("Ibuprofen", "1", "3", DurationUnit::Days)],
                notes: None,
            })
            .expect("issue should succeed");

        let for_a = service.list_for_patient(&patient_a);
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|p| p.patient_id == patient_a));
        assert!(for_a[0].issued_at >= for_a[1].issued_at);
    }
}

//! ICU charting.
//!
//! Chart entries capture periodic vitals plus fluid intake/output for a
//! patient. Intake and output figures arrive from charting forms as
//! numbers or numeric strings and are coerced leniently (`fluid`); the
//! patient's fluid balance is the pure reduction over their entries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::error::RecordResult;
use crate::fluid::{self, FluidBalance};
use crate::patients::PatientService;
use crate::store::RecordStore;
use hims_uuid::RecordId;

/// One row on a patient's ICU chart.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct IcuChartEntry {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    pub recorded_at: DateTime<Utc>,
    pub pulse_rate: Option<u32>,
    /// Free-text reading such as "118/76".
    pub blood_pressure: Option<String>,
    pub temperature_c: Option<f64>,
    #[serde(default, deserialize_with = "fluid::deserialize_lenient_ml")]
    #[schema(value_type = f64)]
    pub total_intake_ml: f64,
    #[serde(default, deserialize_with = "fluid::deserialize_lenient_ml")]
    #[schema(value_type = f64)]
    pub total_output_ml: f64,
    pub remarks: Option<String>,
}

/// Input for charting one entry.
#[derive(Clone, Debug)]
pub struct NewIcuEntry {
    pub patient_id: RecordId,
    pub pulse_rate: Option<u32>,
    pub blood_pressure: Option<String>,
    pub temperature_c: Option<f64>,
    pub total_intake_ml: f64,
    pub total_output_ml: f64,
    pub remarks: Option<String>,
}

/// Service for ICU charting operations.
#[derive(Clone, Debug)]
pub struct IcuService {
    cfg: Arc<CoreConfig>,
    store: RecordStore,
}

impl IcuService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = RecordStore::new(cfg.icu_dir());
        Self { cfg, store }
    }

    /// Charts a new entry for a patient.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the patient does not exist.
    pub fn chart(&self, new: NewIcuEntry) -> RecordResult<IcuChartEntry> {
        PatientService::new(self.cfg.clone()).fetch(&new.patient_id)?;

        self.store.create(|id| IcuChartEntry {
            id,
            patient_id: new.patient_id,
            recorded_at: Utc::now(),
            pulse_rate: new.pulse_rate,
            blood_pressure: new.blood_pressure,
            temperature_c: new.temperature_c,
            total_intake_ml: new.total_intake_ml,
            total_output_ml: new.total_output_ml,
            remarks: new.remarks,
        })
    }

    /// A patient's chart entries, oldest first.
    pub fn entries_for(&self, patient_id: &RecordId) -> Vec<IcuChartEntry> {
        let mut entries: Vec<IcuChartEntry> = self
            .store
            .list::<IcuChartEntry>()
            .into_iter()
            .filter(|e| e.patient_id == *patient_id)
            .collect();
        entries.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        entries
    }

    /// Fluid balance over all of a patient's entries.
    pub fn fluid_balance(&self, patient_id: &RecordId) -> FluidBalance {
        fluid::balance(
            self.entries_for(patient_id)
                .into_iter()
                .map(|e| (e.total_intake_ml, e.total_output_ml)),
        )
    }
}

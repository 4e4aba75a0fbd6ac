//! Swab collection and infection-control monitoring.
//!
//! Surface swabs are collected per hospital area, sent to the lab, and
//! later given a PASS / ACCEPTABLE / FAIL result with an optional CFU
//! count. The per-area contamination rate is derived with
//! `contamination::rate` over all samples of that area, pending results
//! included.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::contamination;
use crate::error::RecordResult;
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// Hospital area a swab was collected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    OperatingTheatre,
    Icu,
    Ward,
    Laboratory,
    Other,
}

impl AreaType {
    /// All area types, in display order.
    pub const ALL: [AreaType; 5] = [
        AreaType::OperatingTheatre,
        AreaType::Icu,
        AreaType::Ward,
        AreaType::Laboratory,
        AreaType::Other,
    ];
}

/// Lab verdict on one swab sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwabOutcome {
    Pass,
    Acceptable,
    Fail,
}

/// A stored swab collection.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SwabCollection {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub area_type: AreaType,
    #[schema(value_type = String)]
    pub location: NonEmptyText,
    pub collected_on: NaiveDate,
    /// Colony-forming units reported by the lab.
    pub cfu_count: Option<u32>,
    /// Absent until the lab result arrives.
    pub result_status: Option<SwabOutcome>,
}

/// Aggregated results for one area type.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct AreaSummary {
    pub area_type: AreaType,
    pub total: usize,
    pub pending: usize,
    pub passed: usize,
    pub acceptable: usize,
    pub failed: usize,
    /// FAIL share of all samples in the area, percent, one decimal.
    pub contamination_rate: f64,
}

/// Service for swab monitoring operations.
#[derive(Clone, Debug)]
pub struct SwabService {
    store: RecordStore,
}

impl SwabService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.swabs_dir()),
        }
    }

    /// Records a freshly collected swab (no result yet).
    pub fn record(
        &self,
        area_type: AreaType,
        location: NonEmptyText,
        collected_on: NaiveDate,
    ) -> RecordResult<SwabCollection> {
        self.store.create(|id| SwabCollection {
            id,
            area_type,
            location,
            collected_on,
            cfu_count: None,
            result_status: None,
        })
    }

    /// Attaches the lab result to a collection.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such collection exists.
    pub fn set_result(
        &self,
        id: &RecordId,
        outcome: SwabOutcome,
        cfu_count: Option<u32>,
    ) -> RecordResult<SwabCollection> {
        let mut collection: SwabCollection = self.store.load(id)?;
        collection.result_status = Some(outcome);
        collection.cfu_count = cfu_count;
        self.store.save(id, &collection)?;
        Ok(collection)
    }

    /// Lists every collection.
    pub fn list(&self) -> Vec<SwabCollection> {
        self.store.list()
    }

    /// Per-area aggregation over all collections.
    ///
    /// Every area type appears in the output, including areas with no
    /// samples (whose rate is 0 by definition).
    pub fn area_summary(&self) -> Vec<AreaSummary> {
        let collections = self.list();

        AreaType::ALL
            .into_iter()
            .map(|area_type| {
                let mut total = 0;
                let mut pending = 0;
                let mut passed = 0;
                let mut acceptable = 0;
                let mut failed = 0;

                for sample in collections.iter().filter(|c| c.area_type == area_type) {
                    total += 1;
                    match sample.result_status {
                        None => pending += 1,
                        Some(SwabOutcome::Pass) => passed += 1,
                        Some(SwabOutcome::Acceptable) => acceptable += 1,
                        Some(SwabOutcome::Fail) => failed += 1,
                    }
                }

                AreaSummary {
                    area_type,
                    total,
                    pending,
                    passed,
                    acceptable,
                    failed,
                    contamination_rate: contamination::rate(failed, total),
                }
            })
            .collect()
    }

    /// Number of collections still awaiting a lab result.
    pub fn pending_count(&self) -> usize {
        self.list()
            .iter()
            .filter(|c| c.result_status.is_none())
            .count()
    }
}

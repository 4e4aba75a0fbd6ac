//! ICU charting endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::fluid::{self, FluidBalance};
use hims_core::icu::{IcuChartEntry, IcuService, NewIcuEntry};

use crate::{map_record_error, parse_id, ApiResult, AppState};

/// Request body for charting one ICU entry.
///
/// Intake and output accept a number or a numeric string; non-numeric
/// input coerces to 0, matching how charting forms submit the figures.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateIcuEntryReq {
    pub patient_id: String,
    pub pulse_rate: Option<u32>,
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

/// A patient's chart entries, oldest first.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListIcuEntriesRes {
    pub entries: Vec<IcuChartEntry>,
}

#[utoipa::path(
    post,
    path = "/icu/entries",
    request_body = CreateIcuEntryReq,
    responses(
        (status = 200, description = "Entry charted", body = IcuChartEntry),
        (status = 400, description = "Bad request"),
        (status = 404, description = "No such patient")
    )
)]
/// Chart an ICU entry
pub async fn create_entry(
    State(state): State<AppState>,
    Json(req): Json<CreateIcuEntryReq>,
) -> ApiResult<IcuChartEntry> {
    let patient_id = parse_id(&req.patient_id)?;

    IcuService::new(state.cfg.clone())
        .chart(NewIcuEntry {
            patient_id,
            pulse_rate: req.pulse_rate,
            blood_pressure: req.blood_pressure,
            temperature_c: req.temperature_c,
            total_intake_ml: req.total_intake_ml,
            total_output_ml: req.total_output_ml,
            remarks: req.remarks,
        })
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/patients/{id}/icu/entries",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The patient's chart entries", body = ListIcuEntriesRes),
        (status = 400, description = "Malformed identifier")
    )
)]
/// List a patient's ICU chart entries
pub async fn list_entries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ListIcuEntriesRes> {
    let patient_id = parse_id(&id)?;
    let entries = IcuService::new(state.cfg.clone()).entries_for(&patient_id);
    Ok(Json(ListIcuEntriesRes { entries }))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/icu/fluid-balance",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Fluid totals over all entries", body = FluidBalance),
        (status = 400, description = "Malformed identifier")
    )
)]
/// Fluid balance for a patient
///
/// Sums intake and output across every chart entry; an uncharted patient
/// gets all zeroes.
pub async fn fluid_balance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FluidBalance> {
    let patient_id = parse_id(&id)?;
    let balance = IcuService::new(state.cfg.clone()).fluid_balance(&patient_id);
    Ok(Json(balance))
}

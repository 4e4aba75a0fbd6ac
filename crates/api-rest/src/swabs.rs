//! Swab monitoring endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::swabs::{AreaSummary, AreaType, SwabCollection, SwabOutcome, SwabService};

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for recording a swab collection.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateSwabReq {
    pub area_type: AreaType,
    pub location: String,
    /// Collection date; defaults to today when omitted.
    pub collected_on: Option<NaiveDate>,
}

/// Request body for attaching a lab result.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct SwabResultReq {
    pub result_status: SwabOutcome,
    pub cfu_count: Option<u32>,
}

/// Per-area aggregation of swab results.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct AreaSummaryRes {
    pub areas: Vec<AreaSummary>,
}

#[utoipa::path(
    post,
    path = "/swabs",
    request_body = CreateSwabReq,
    responses(
        (status = 200, description = "Collection recorded", body = SwabCollection),
        (status = 400, description = "Bad request")
    )
)]
/// Record a swab collection
pub async fn create_swab(
    State(state): State<AppState>,
    Json(req): Json<CreateSwabReq>,
) -> ApiResult<SwabCollection> {
    let location = non_empty("location", &req.location)?;
    let collected_on = req.collected_on.unwrap_or_else(|| Utc::now().date_naive());

    SwabService::new(state.cfg.clone())
        .record(req.area_type, location, collected_on)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    post,
    path = "/swabs/{id}/result",
    params(("id" = String, Path, description = "Collection identifier")),
    request_body = SwabResultReq,
    responses(
        (status = 200, description = "Result recorded", body = SwabCollection),
        (status = 404, description = "No such collection")
    )
)]
/// Attach a lab result to a collection
pub async fn set_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SwabResultReq>,
) -> ApiResult<SwabCollection> {
    let id = parse_id(&id)?;

    SwabService::new(state.cfg.clone())
        .set_result(&id, req.result_status, req.cfu_count)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/swabs/summary",
    responses(
        (status = 200, description = "Per-area totals and contamination rates", body = AreaSummaryRes)
    )
)]
/// Per-area swab summary
///
/// Contamination rate is the FAIL share of all samples in the area,
/// percent, one decimal place; areas without samples report 0.
pub async fn area_summary(State(state): State<AppState>) -> Json<AreaSummaryRes> {
    let areas = SwabService::new(state.cfg.clone()).area_summary();
    Json(AreaSummaryRes { areas })
}

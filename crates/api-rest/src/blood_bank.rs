//! Blood bank endpoints.

use axum::extract::State;
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::blood_bank::{BloodBankService, BloodGroup, BloodUnit, StockLevel};

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for recording a donation.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct DonationReq {
    pub donor_name: String,
    pub blood_group: BloodGroup,
    /// Collection date; defaults to today when omitted.
    pub collected_on: Option<NaiveDate>,
}

/// Request body for issuing a unit to a patient.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct IssueReq {
    pub blood_group: BloodGroup,
    pub patient_id: String,
}

/// Available-unit counts per blood group.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct StockLevelsRes {
    pub stock: Vec<StockLevel>,
}

/// Units discarded by an expiry sweep.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DiscardExpiredRes {
    pub discarded: Vec<BloodUnit>,
}

#[utoipa::path(
    post,
    path = "/blood-bank/donations",
    request_body = DonationReq,
    responses(
        (status = 200, description = "Unit recorded", body = BloodUnit),
        (status = 400, description = "Bad request")
    )
)]
/// Record a blood donation
///
/// The unit's expiry date is derived from the collection date plus the
/// 42-day shelf life.
pub async fn record_donation(
    State(state): State<AppState>,
    Json(req): Json<DonationReq>,
) -> ApiResult<BloodUnit> {
    let donor_name = non_empty("donor_name", &req.donor_name)?;
    let collected_on = req.collected_on.unwrap_or_else(|| Utc::now().date_naive());

    BloodBankService::new(state.cfg.clone())
        .record_donation(donor_name, req.blood_group, collected_on)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    post,
    path = "/blood-bank/issues",
    request_body = IssueReq,
    responses(
        (status = 200, description = "Unit issued", body = BloodUnit),
        (status = 400, description = "Out of stock or bad request"),
        (status = 404, description = "No such patient")
    )
)]
/// Issue a blood unit to a patient
///
/// Picks the oldest available, unexpired unit of the requested group.
pub async fn issue_unit(
    State(state): State<AppState>,
    Json(req): Json<IssueReq>,
) -> ApiResult<BloodUnit> {
    let patient_id = parse_id(&req.patient_id)?;
    let today = Utc::now().date_naive();

    BloodBankService::new(state.cfg.clone())
        .issue(req.blood_group, &patient_id, today)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    post,
    path = "/blood-bank/discard-expired",
    responses(
        (status = 200, description = "Expired available units marked discarded", body = DiscardExpiredRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Discard expired units
///
/// Marks every available unit past its expiry date as discarded and
/// returns them.
pub async fn discard_expired(State(state): State<AppState>) -> ApiResult<DiscardExpiredRes> {
    let today = Utc::now().date_naive();

    BloodBankService::new(state.cfg.clone())
        .discard_expired(today)
        .map(|discarded| Json(DiscardExpiredRes { discarded }))
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/blood-bank/stock",
    responses(
        (status = 200, description = "Available units per blood group", body = StockLevelsRes)
    )
)]
/// Blood stock levels
///
/// Every blood group appears, including groups with zero units.
pub async fn stock_levels(State(state): State<AppState>) -> Json<StockLevelsRes> {
    let stock = BloodBankService::new(state.cfg.clone()).stock_levels();
    Json(StockLevelsRes { stock })
}

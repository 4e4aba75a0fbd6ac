//! Staff account endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::staff::{NewStaffAccount, StaffAccount, StaffRole, StaffService};
use hims_types::EmailAddress;

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for creating a staff account.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateStaffReq {
    pub full_name: String,
    pub email: String,
    pub role: StaffRole,
}

/// List of staff accounts.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListStaffRes {
    pub staff: Vec<StaffAccount>,
}

#[utoipa::path(
    post,
    path = "/staff",
    request_body = CreateStaffReq,
    responses(
        (status = 200, description = "Account created", body = StaffAccount),
        (status = 400, description = "Bad request")
    )
)]
/// Create a staff account
///
/// The email address is validated structurally; an implausible value is
/// rejected with 400.
pub async fn create_staff(
    State(state): State<AppState>,
    Json(req): Json<CreateStaffReq>,
) -> ApiResult<StaffAccount> {
    let new = NewStaffAccount {
        full_name: non_empty("full_name", &req.full_name)?,
        email: EmailAddress::parse(&req.email)
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("email: {e}")))?,
        role: req.role,
    };

    StaffService::new(state.cfg.clone())
        .create(new)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/staff",
    responses(
        (status = 200, description = "All staff accounts", body = ListStaffRes)
    )
)]
/// List staff accounts
pub async fn list_staff(State(state): State<AppState>) -> Json<ListStaffRes> {
    let staff = StaffService::new(state.cfg.clone()).list();
    Json(ListStaffRes { staff })
}

#[utoipa::path(
    post,
    path = "/staff/{id}/deactivate",
    params(("id" = String, Path, description = "Staff account identifier")),
    responses(
        (status = 200, description = "Deactivated account", body = StaffAccount),
        (status = 404, description = "No such account")
    )
)]
/// Deactivate a staff account
///
/// Idempotent: deactivating an inactive account returns it unchanged.
pub async fn deactivate_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StaffAccount> {
    let id = parse_id(&id)?;

    StaffService::new(state.cfg.clone())
        .deactivate(&id)
        .map(Json)
        .map_err(map_record_error)
}

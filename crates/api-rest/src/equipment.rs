//! Equipment endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::equipment::{
    EquipmentRecord, EquipmentService, EquipmentStatusView, NewEquipment,
};
use hims_core::scheduling::ServiceFrequency;

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for registering equipment.
///
/// At least one of `last_service_date` / `next_due_date` must be present.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateEquipmentReq {
    pub name: String,
    pub department: String,
    pub serial_number: Option<String>,
    pub service_frequency: ServiceFrequency,
    pub last_service_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Request body for recording a completed service.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct RecordServiceReq {
    /// Service date; defaults to today when omitted.
    pub serviced_on: Option<NaiveDate>,
}

/// Equipment records with derived status.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListEquipmentRes {
    pub equipment: Vec<EquipmentStatusView>,
}

#[utoipa::path(
    post,
    path = "/equipment",
    request_body = CreateEquipmentReq,
    responses(
        (status = 200, description = "Equipment registered", body = EquipmentRecord),
        (status = 400, description = "Bad request")
    )
)]
/// Register a piece of equipment
///
/// When a last service date is supplied the next due date is computed
/// from it and the service frequency; otherwise the manual due date is
/// used.
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(req): Json<CreateEquipmentReq>,
) -> ApiResult<EquipmentRecord> {
    let new = NewEquipment {
        name: non_empty("name", &req.name)?,
        department: non_empty("department", &req.department)?,
        serial_number: req.serial_number,
        service_frequency: req.service_frequency,
        last_service_date: req.last_service_date,
        next_due_date: req.next_due_date,
        notes: req.notes,
    };

    EquipmentService::new(state.cfg.clone())
        .register(new)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/equipment",
    responses(
        (status = 200, description = "Equipment with derived service status", body = ListEquipmentRes)
    )
)]
/// List equipment with service status
///
/// Status is derived against today's date: overdue below 0 days to the
/// due date, due-soon up to 30 days out, up-to-date beyond that.
pub async fn list_equipment(State(state): State<AppState>) -> Json<ListEquipmentRes> {
    let today = Utc::now().date_naive();
    let equipment = EquipmentService::new(state.cfg.clone()).list_with_status(today);
    Json(ListEquipmentRes { equipment })
}

#[utoipa::path(
    get,
    path = "/equipment/{id}",
    params(("id" = String, Path, description = "Equipment identifier")),
    responses(
        (status = 200, description = "The equipment record", body = EquipmentRecord),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No such equipment")
    )
)]
/// Fetch one equipment record
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EquipmentRecord> {
    let id = parse_id(&id)?;
    EquipmentService::new(state.cfg.clone())
        .fetch(&id)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    post,
    path = "/equipment/{id}/service",
    params(("id" = String, Path, description = "Equipment identifier")),
    request_body = RecordServiceReq,
    responses(
        (status = 200, description = "Service recorded, due date recomputed", body = EquipmentRecord),
        (status = 404, description = "No such equipment")
    )
)]
/// Record a completed service
pub async fn record_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RecordServiceReq>,
) -> ApiResult<EquipmentRecord> {
    let id = parse_id(&id)?;
    let serviced_on = req.serviced_on.unwrap_or_else(|| Utc::now().date_naive());

    EquipmentService::new(state.cfg.clone())
        .record_service(&id, serviced_on)
        .map(Json)
        .map_err(map_record_error)
}

//! Patient endpoints.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::blood_bank::BloodGroup;
use hims_core::patients::{NewPatient, PatientRecord, PatientService, PatientUpdate, Sex};

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for registering a patient.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Request body for a partial demographics update.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub blood_group: Option<BloodGroup>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// List of patient records.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 200, description = "Patient registered", body = PatientRecord),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Register a new patient
///
/// First and last name are required; a blank value is rejected with 400.
pub async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientReq>,
) -> ApiResult<PatientRecord> {
    let new = NewPatient {
        first_name: non_empty("first_name", &req.first_name)?,
        last_name: non_empty("last_name", &req.last_name)?,
        birth_date: req.birth_date,
        sex: req.sex,
        blood_group: req.blood_group,
        phone: req.phone,
        address: req.address,
    };

    PatientService::new(state.cfg.clone())
        .register(new)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "List of patients", body = ListPatientsRes)
    )
)]
/// List all patients
pub async fn list_patients(State(state): State<AppState>) -> Json<ListPatientsRes> {
    let patients = PatientService::new(state.cfg.clone()).list();
    Json(ListPatientsRes { patients })
}

#[utoipa::path(
    get,
    path = "/patients/search",
    params(("q" = String, Query, description = "Case-insensitive name fragment")),
    responses(
        (status = 200, description = "Matching patients", body = ListPatientsRes)
    )
)]
/// Search patients by name
///
/// Case-insensitive substring match over the combined first and last
/// name. A blank query matches everyone.
pub async fn search_patients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ListPatientsRes> {
    let patients = PatientService::new(state.cfg.clone()).search(&params.q);
    Json(ListPatientsRes { patients })
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The patient", body = PatientRecord),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "No such patient")
    )
)]
/// Fetch one patient
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PatientRecord> {
    let id = parse_id(&id)?;
    PatientService::new(state.cfg.clone())
        .fetch(&id)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    request_body = UpdatePatientReq,
    responses(
        (status = 200, description = "Updated patient", body = PatientRecord),
        (status = 400, description = "Bad request"),
        (status = 404, description = "No such patient")
    )
)]
/// Update a patient's demographics
///
/// Only the supplied fields change; omitted fields keep their stored
/// values.
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePatientReq>,
) -> ApiResult<PatientRecord> {
    let id = parse_id(&id)?;

    let first_name = req
        .first_name
        .as_deref()
        .map(|v| non_empty("first_name", v))
        .transpose()?;
    let last_name = req
        .last_name
        .as_deref()
        .map(|v| non_empty("last_name", v))
        .transpose()?;

    let update = PatientUpdate {
        first_name,
        last_name,
        birth_date: req.birth_date,
        sex: req.sex,
        blood_group: req.blood_group,
        phone: req.phone,
        address: req.address,
    };

    PatientService::new(state.cfg.clone())
        .update(&id, update)
        .map(Json)
        .map_err(map_record_error)
}

//! Prescription endpoints.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::dosing::DurationUnit;
use hims_core::prescriptions::{
    MedicineOrderInput, NewPrescription, Prescription, PrescriptionService,
};

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// One medicine line as submitted by the prescribing form.
///
/// `frequency_code` and `duration` are free text; unknown codes and bad
/// durations fall back (once daily / 1) rather than rejecting the order.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct MedicineOrderReq {
    pub medicine: String,
    /// Dosing code "1".."4".
    pub frequency_code: String,
    pub duration: String,
    pub duration_unit: DurationUnit,
}

/// Request body for issuing a prescription.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreatePrescriptionReq {
    pub patient_id: String,
    pub prescriber: String,
    pub items: Vec<MedicineOrderReq>,
    pub notes: Option<String>,
}

/// List of prescriptions.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListPrescriptionsRes {
    pub prescriptions: Vec<Prescription>,
}

#[utoipa::path(
    post,
    path = "/prescriptions",
    request_body = CreatePrescriptionReq,
    responses(
        (status = 200, description = "Prescription issued", body = Prescription),
        (status = 400, description = "Bad request"),
        (status = 404, description = "No such patient")
    )
)]
/// Issue a prescription
///
/// Quantity and schedule are derived server-side for every item; the
/// response carries the computed values.
pub async fn create_prescription(
    State(state): State<AppState>,
    Json(req): Json<CreatePrescriptionReq>,
) -> ApiResult<Prescription> {
    let patient_id = parse_id(&req.patient_id)?;
    let prescriber = non_empty("prescriber", &req.prescriber)?;

    let mut items = Vec::with_capacity(req.items.len());
    for item in req.items {
        items.push(MedicineOrderInput {
            medicine: non_empty("medicine", &item.medicine)?,
            frequency_code: item.frequency_code,
            duration: item.duration,
            duration_unit: item.duration_unit,
        });
    }

    PrescriptionService::new(state.cfg.clone())
        .issue(NewPrescription {
            patient_id,
            prescriber,
            items,
            notes: req.notes,
        })
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/prescriptions/{id}",
    params(("id" = String, Path, description = "Prescription identifier")),
    responses(
        (status = 200, description = "The prescription", body = Prescription),
        (status = 404, description = "No such prescription")
    )
)]
/// Fetch one prescription
pub async fn get_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Prescription> {
    let id = parse_id(&id)?;
    PrescriptionService::new(state.cfg.clone())
        .fetch(&id)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/patients/{id}/prescriptions",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "The patient's prescriptions, newest first", body = ListPrescriptionsRes),
        (status = 400, description = "Malformed identifier")
    )
)]
/// List a patient's prescriptions
pub async fn list_patient_prescriptions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ListPrescriptionsRes> {
    let patient_id = parse_id(&id)?;
    let prescriptions =
        PrescriptionService::new(state.cfg.clone()).list_for_patient(&patient_id);
    Ok(Json(ListPrescriptionsRes { prescriptions }))
}

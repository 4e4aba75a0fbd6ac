//! # API REST
//!
//! REST API implementation for hims.
//!
//! Handles:
//! - HTTP endpoints with axum, one module per record family
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON parsing, status-code mapping, CORS)
//!
//! All domain rules live in `hims-core`; handlers validate raw wire input
//! into typed core inputs and map `RecordError` onto HTTP status codes.

#![warn(rust_2018_idioms)]

pub mod admin;
pub mod blood_bank;
pub mod equipment;
pub mod health;
pub mod icu;
pub mod inventory;
pub mod notifications;
pub mod patients;
pub mod prescriptions;
pub mod staff;
pub mod swabs;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hims_core::{CoreConfig, NonEmptyText, RecordError, RecordId};

/// Application state shared across REST API handlers.
///
/// Core services are cheap wrappers around the configuration, so handlers
/// construct them per request from the shared `CoreConfig`.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }
}

/// Handler result: a JSON body or an HTTP error with a message.
pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Maps a core error onto an HTTP status code.
///
/// Validation problems become 400, missing records 404, everything else
/// is logged and reported as an opaque 500.
pub(crate) fn map_record_error(err: RecordError) -> (StatusCode, String) {
    match err {
        RecordError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        RecordError::InvalidInput(_) | RecordError::Id(_) | RecordError::Text(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        other => {
            tracing::error!("internal error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

/// Parses a path-segment record identifier, rejecting non-canonical input.
pub(crate) fn parse_id(raw: &str) -> Result<RecordId, (StatusCode, String)> {
    RecordId::parse(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Validates a required text field from a request body.
pub(crate) fn non_empty(field: &str, value: &str) -> Result<NonEmptyText, (StatusCode, String)> {
    NonEmptyText::new(value).map_err(|e| (StatusCode::BAD_REQUEST, format!("{field}: {e}")))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        patients::create_patient,
        patients::list_patients,
        patients::search_patients,
        patients::get_patient,
        patients::update_patient,
        prescriptions::create_prescription,
        prescriptions::get_prescription,
        prescriptions::list_patient_prescriptions,
        blood_bank::record_donation,
        blood_bank::issue_unit,
        blood_bank::discard_expired,
        blood_bank::stock_levels,
        equipment::create_equipment,
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::record_service,
        icu::create_entry,
        icu::list_entries,
        icu::fluid_balance,
        swabs::create_swab,
        swabs::set_result,
        swabs::area_summary,
        inventory::create_item,
        inventory::list_items,
        inventory::low_stock,
        inventory::adjust_stock,
        notifications::push_notification,
        notifications::list_notifications,
        notifications::mark_read,
        staff::create_staff,
        staff::list_staff,
        staff::deactivate_staff,
        admin::overview,
    ),
    components(schemas(
        health::HealthRes,
        patients::CreatePatientReq,
        patients::UpdatePatientReq,
        patients::ListPatientsRes,
        prescriptions::CreatePrescriptionReq,
        prescriptions::MedicineOrderReq,
        prescriptions::ListPrescriptionsRes,
        blood_bank::DonationReq,
        blood_bank::IssueReq,
        blood_bank::StockLevelsRes,
        blood_bank::DiscardExpiredRes,
        equipment::CreateEquipmentReq,
        equipment::RecordServiceReq,
        equipment::ListEquipmentRes,
        icu::CreateIcuEntryReq,
        icu::ListIcuEntriesRes,
        swabs::CreateSwabReq,
        swabs::SwabResultReq,
        swabs::AreaSummaryRes,
        inventory::CreateItemReq,
        inventory::AdjustStockReq,
        inventory::ListItemsRes,
        notifications::PushNotificationReq,
        notifications::ListNotificationsRes,
        staff::CreateStaffReq,
        staff::ListStaffRes,
        hims_core::patients::PatientRecord,
        hims_core::patients::Sex,
        hims_core::prescriptions::Prescription,
        hims_core::prescriptions::MedicineOrder,
        hims_core::dosing::DoseFrequency,
        hims_core::dosing::DurationUnit,
        hims_core::blood_bank::BloodUnit,
        hims_core::blood_bank::BloodGroup,
        hims_core::blood_bank::UnitStatus,
        hims_core::blood_bank::StockLevel,
        hims_core::equipment::EquipmentRecord,
        hims_core::equipment::EquipmentStatusView,
        hims_core::scheduling::ServiceFrequency,
        hims_core::scheduling::ServiceStatus,
        hims_core::icu::IcuChartEntry,
        hims_core::fluid::FluidBalance,
        hims_core::swabs::SwabCollection,
        hims_core::swabs::AreaType,
        hims_core::swabs::SwabOutcome,
        hims_core::swabs::AreaSummary,
        hims_core::inventory::InventoryItem,
        hims_core::inventory::ItemCategory,
        hims_core::notifications::Notification,
        hims_core::notifications::Severity,
        hims_core::staff::StaffAccount,
        hims_core::staff::StaffRole,
        hims_core::admin::SystemOverview,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router with CORS and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/patients", post(patients::create_patient))
        .route("/patients", get(patients::list_patients))
        .route("/patients/search", get(patients::search_patients))
        .route("/patients/:id", get(patients::get_patient))
        .route("/patients/:id", put(patients::update_patient))
        .route("/prescriptions", post(prescriptions::create_prescription))
        .route("/prescriptions/:id", get(prescriptions::get_prescription))
        .route(
            "/patients/:id/prescriptions",
            get(prescriptions::list_patient_prescriptions),
        )
        .route("/blood-bank/donations", post(blood_bank::record_donation))
        .route("/blood-bank/issues", post(blood_bank::issue_unit))
        .route(
            "/blood-bank/discard-expired",
            post(blood_bank::discard_expired),
        )
        .route("/blood-bank/stock", get(blood_bank::stock_levels))
        .route("/equipment", post(equipment::create_equipment))
        .route("/equipment", get(equipment::list_equipment))
        .route("/equipment/:id", get(equipment::get_equipment))
        .route("/equipment/:id/service", post(equipment::record_service))
        .route("/icu/entries", post(icu::create_entry))
        .route("/patients/:id/icu/entries", get(icu::list_entries))
        .route("/patients/:id/icu/fluid-balance", get(icu::fluid_balance))
        .route("/swabs", post(swabs::create_swab))
        .route("/swabs/:id/result", post(swabs::set_result))
        .route("/swabs/summary", get(swabs::area_summary))
        .route("/inventory", post(inventory::create_item))
        .route("/inventory", get(inventory::list_items))
        .route("/inventory/low-stock", get(inventory::low_stock))
        .route("/inventory/:id/adjust", post(inventory::adjust_stock))
        .route("/notifications", post(notifications::push_notification))
        .route(
            "/notifications/:recipient_id",
            get(notifications::list_notifications),
        )
        .route("/notifications/:id/read", post(notifications::mark_read))
        .route("/staff", post(staff::create_staff))
        .route("/staff", get(staff::list_staff))
        .route("/staff/:id/deactivate", post(staff::deactivate_staff))
        .route("/admin/overview", get(admin::overview))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

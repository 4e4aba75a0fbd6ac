//! Super-admin endpoints.

use axum::extract::State;
use axum::response::Json;
use chrono::Utc;

use hims_core::admin::{AdminService, SystemOverview};

use crate::AppState;

#[utoipa::path(
    get,
    path = "/admin/overview",
    responses(
        (status = 200, description = "Headline figures across every section", body = SystemOverview)
    )
)]
/// System overview
///
/// Read-only aggregation over every record family; equipment status is
/// derived against today's date.
pub async fn overview(State(state): State<AppState>) -> Json<SystemOverview> {
    let today = Utc::now().date_naive();
    Json(AdminService::new(state.cfg.clone()).overview(today))
}

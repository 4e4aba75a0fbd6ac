//! Notification endpoints.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hims_core::notifications::{Notification, NotificationService, Severity};

use crate::{map_record_error, non_empty, parse_id, ApiResult, AppState};

/// Request body for pushing a notification.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct PushNotificationReq {
    pub recipient_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub severity: Severity,
}

/// A recipient's notifications, newest first.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListNotificationsRes {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub unread_only: bool,
}

#[utoipa::path(
    post,
    path = "/notifications",
    request_body = PushNotificationReq,
    responses(
        (status = 200, description = "Notification pushed", body = Notification),
        (status = 400, description = "Bad request"),
        (status = 404, description = "No such recipient")
    )
)]
/// Push a notification to a staff account
pub async fn push_notification(
    State(state): State<AppState>,
    Json(req): Json<PushNotificationReq>,
) -> ApiResult<Notification> {
    let recipient_id = parse_id(&req.recipient_id)?;
    let title = non_empty("title", &req.title)?;

    NotificationService::new(state.cfg.clone())
        .push(recipient_id, title, req.body, req.severity)
        .map(Json)
        .map_err(map_record_error)
}

#[utoipa::path(
    get,
    path = "/notifications/{recipient_id}",
    params(
        ("recipient_id" = String, Path, description = "Staff account identifier"),
        ("unread_only" = Option<bool>, Query, description = "Restrict to unread notifications")
    ),
    responses(
        (status = 200, description = "The recipient's notifications", body = ListNotificationsRes),
        (status = 400, description = "Malformed identifier")
    )
)]
/// List a recipient's notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(recipient_id): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListNotificationsRes> {
    let recipient_id = parse_id(&recipient_id)?;
    let notifications =
        NotificationService::new(state.cfg.clone()).list_for(&recipient_id, params.unread_only);
    Ok(Json(ListNotificationsRes { notifications }))
}

#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification identifier")),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 404, description = "No such notification")
    )
)]
/// Mark a notification read
///
/// Re-marking an already-read notification is a no-op.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Notification> {
    let id = parse_id(&id)?;

    NotificationService::new(state.cfg.clone())
        .mark_read(&id)
        .map(Json)
        .map_err(map_record_error)
}

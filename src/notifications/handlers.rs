use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    NotificationDto, NotificationListResponse, NotificationResponse, PushNotificationRequest,
};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::envelope::StatusResponse;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications).post(push_notification))
        .route("/notifications/:id/read", put(mark_notification_read))
        .route("/notifications/:id", delete(delete_notification))
}

#[instrument(skip(state))]
async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<NotificationListResponse>, ServiceError> {
    let rows = services::list(&state, user_id).await?;
    Ok(Json(NotificationListResponse {
        success: true,
        message: "OK".into(),
        notifications: rows.into_iter().map(NotificationDto::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
async fn push_notification(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PushNotificationRequest>,
) -> Result<Json<NotificationResponse>, ServiceError> {
    let row = services::push(&state, user_id, &payload.content).await?;
    Ok(Json(NotificationResponse {
        success: true,
        message: "Notification created".into(),
        notification: NotificationDto::from(row),
    }))
}

#[instrument(skip(state))]
async fn mark_notification_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::mark_read(&state, id, user_id).await?;
    Ok(Json(StatusResponse::ok("Notification marked as read")))
}

#[instrument(skip(state))]
async fn delete_notification(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::delete(&state, id, user_id).await?;
    Ok(Json(StatusResponse::ok("Notification deleted")))
}

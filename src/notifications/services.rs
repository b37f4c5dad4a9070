use uuid::Uuid;

use super::repo::{self, NotificationRow};
use crate::error::ServiceError;
use crate::state::AppState;

pub async fn list(state: &AppState, user_id: Uuid) -> Result<Vec<NotificationRow>, ServiceError> {
    Ok(repo::list_by_user(&state.db, user_id).await?)
}

pub async fn push(
    state: &AppState,
    user_id: Uuid,
    content: &str,
) -> Result<NotificationRow, ServiceError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ServiceError::validation("Notification content is required"));
    }
    Ok(repo::insert(&state.db, user_id, content).await?)
}

pub async fn mark_read(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
    if !repo::mark_read(&state.db, id, user_id).await? {
        return Err(ServiceError::not_found(format!("Notification {id} not found")));
    }
    Ok(())
}

pub async fn delete(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
    if !repo::delete_for_user(&state.db, id, user_id).await? {
        return Err(ServiceError::not_found(format!("Notification {id} not found")));
    }
    Ok(())
}

use uuid::Uuid;

use super::dto::CategoryRequest;
use super::repo::{self, CategoryRow};
use crate::error::ServiceError;
use crate::state::AppState;

pub async fn list(state: &AppState) -> Result<Vec<CategoryRow>, ServiceError> {
    Ok(repo::list_all(&state.db).await?)
}

pub async fn create(state: &AppState, req: CategoryRequest) -> Result<CategoryRow, ServiceError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("Category name is required"));
    }
    Ok(repo::insert(&state.db, name, req.icon.as_deref()).await?)
}

pub async fn update(
    state: &AppState,
    id: Uuid,
    req: CategoryRequest,
) -> Result<CategoryRow, ServiceError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("Category name is required"));
    }
    repo::update(&state.db, id, name, req.icon.as_deref())
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Category {id} not found")))
}

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{CategoryDto, CategoryListResponse, CategoryRequest, CategoryResponse};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", put(update_category))
}

#[instrument(skip(state))]
async fn list_categories(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<CategoryListResponse>, ServiceError> {
    let categories = services::list(&state).await?;
    Ok(Json(CategoryListResponse {
        success: true,
        message: "OK".into(),
        categories: categories.into_iter().map(CategoryDto::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
async fn create_category(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ServiceError> {
    let category = services::create(&state, payload).await?;
    Ok(Json(CategoryResponse {
        success: true,
        message: "Category created".into(),
        category: CategoryDto::from(category),
    }))
}

#[instrument(skip(state, payload))]
async fn update_category(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, ServiceError> {
    let category = services::update(&state, id, payload).await?;
    Ok(Json(CategoryResponse {
        success: true,
        message: "Category updated".into(),
        category: CategoryDto::from(category),
    }))
}

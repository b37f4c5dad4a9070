use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    BudgetDto, BudgetListResponse, BudgetResponse, CreateBudgetRequest, UpdateAmountRequest,
    UpdateInitialAmountRequest,
};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::envelope::StatusResponse;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/amount", put(update_amount))
        .route("/budgets/initial-amount", put(update_initial_amount))
        .route("/budgets/:id", axum::routing::delete(delete_budget))
}

#[instrument(skip(state))]
async fn list_budgets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<BudgetListResponse>, ServiceError> {
    let budgets = services::list_current_month(&state, user_id).await?;
    Ok(Json(BudgetListResponse {
        success: true,
        message: "OK".into(),
        budgets: budgets.into_iter().map(BudgetDto::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
async fn create_budget(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> Result<Json<BudgetResponse>, ServiceError> {
    let budget = services::create(&state, user_id, payload).await?;
    Ok(Json(BudgetResponse {
        success: true,
        message: "Budget created".into(),
        budget: BudgetDto::from(budget),
    }))
}

#[instrument(skip(state, payload))]
async fn update_amount(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateAmountRequest>,
) -> Result<Json<BudgetResponse>, ServiceError> {
    let budget = services::update_current_amount(&state, user_id, payload).await?;
    Ok(Json(BudgetResponse {
        success: true,
        message: "Budget amount updated".into(),
        budget: BudgetDto::from(budget),
    }))
}

#[instrument(skip(state, payload))]
async fn update_initial_amount(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateInitialAmountRequest>,
) -> Result<Json<BudgetResponse>, ServiceError> {
    let budget = services::update_initial_amount(&state, user_id, payload).await?;
    Ok(Json(BudgetResponse {
        success: true,
        message: "Budget initial amount updated".into(),
        budget: BudgetDto::from(budget),
    }))
}

#[instrument(skip(state))]
async fn delete_budget(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::delete(&state, id, user_id).await?;
    Ok(Json(StatusResponse::ok("Budget deleted")))
}

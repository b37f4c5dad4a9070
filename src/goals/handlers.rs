use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CreateGoalRequest, GoalListResponse, GoalResponse, SavingGoalDto, UpdateGoalAmountRequest,
};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::envelope::StatusResponse;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/saving-goals", get(list_goals).post(create_goal))
        .route("/saving-goals/amount", put(update_amount))
        .route("/saving-goals/:id", axum::routing::delete(delete_goal))
}

#[instrument(skip(state))]
async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<GoalListResponse>, ServiceError> {
    let goals = services::list(&state, user_id).await?;
    Ok(Json(GoalListResponse {
        success: true,
        message: "OK".into(),
        goals: goals.into_iter().map(SavingGoalDto::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<Json<GoalResponse>, ServiceError> {
    let goal = services::create(&state, user_id, payload).await?;
    Ok(Json(GoalResponse {
        success: true,
        message: "Saving goal created".into(),
        goal: SavingGoalDto::from(goal),
    }))
}

#[instrument(skip(state, payload))]
async fn update_amount(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateGoalAmountRequest>,
) -> Result<Json<GoalResponse>, ServiceError> {
    let goal = services::update_amount(&state, user_id, payload).await?;
    Ok(Json(GoalResponse {
        success: true,
        message: "Saving goal amount updated".into(),
        goal: SavingGoalDto::from(goal),
    }))
}

#[instrument(skip(state))]
async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::delete(&state, id, user_id).await?;
    Ok(Json(StatusResponse::ok("Saving goal deleted")))
}

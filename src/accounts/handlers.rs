use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{AccountDto, AccountResponse};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::envelope::StatusResponse;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(get_account))
        .route("/accounts/:id", axum::routing::delete(delete_account))
}

#[instrument(skip(state))]
async fn get_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AccountResponse>, ServiceError> {
    let account = services::get_account(&state, user_id).await?;
    Ok(Json(AccountResponse {
        success: true,
        message: "OK".into(),
        account: AccountDto::from(account),
    }))
}

#[instrument(skip(state))]
async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::delete_account(&state, id, user_id).await?;
    Ok(Json(StatusResponse::ok("Account deleted")))
}

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CreateTransactionRequest, TransactionDto, TransactionListResponse, TransactionResponse,
    UpdateTransactionRequest,
};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::envelope::StatusResponse;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/:id",
            put(update_transaction).delete(delete_transaction),
        )
}

#[instrument(skip(state))]
async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<TransactionListResponse>, ServiceError> {
    let rows = services::list(&state, user_id).await?;
    Ok(Json(TransactionListResponse {
        success: true,
        message: "OK".into(),
        transactions: rows.into_iter().map(TransactionDto::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<Json<TransactionResponse>, ServiceError> {
    let row = services::create(&state, user_id, payload).await?;
    Ok(Json(TransactionResponse {
        success: true,
        message: "Transaction created".into(),
        transaction: TransactionDto::from(row),
    }))
}

#[instrument(skip(state, payload))]
async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Result<Json<TransactionResponse>, ServiceError> {
    let row = services::update(&state, user_id, id, payload).await?;
    Ok(Json(TransactionResponse {
        success: true,
        message: "Transaction updated".into(),
        transaction: TransactionDto::from(row),
    }))
}

#[instrument(skip(state))]
async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::delete(&state, id, user_id).await?;
    Ok(Json(StatusResponse::ok("Transaction deleted")))
}

use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use super::dto::{ChatRequest, ChatResponse};
use super::services;
use crate::auth::jwt::AuthUser;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chatbot/message", post(chat_message))
        .route("/chatbot/parse-transaction", post(parse_transaction))
}

#[instrument(skip(state, payload))]
async fn chat_message(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServiceError> {
    let reply = services::reply(&state, &payload.message).await?;
    Ok(Json(ChatResponse {
        success: true,
        message: "OK".into(),
        reply,
    }))
}

#[instrument(skip(state, payload))]
async fn parse_transaction(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServiceError> {
    let reply = services::parse_transaction(&state, &payload.message).await?;
    Ok(Json(ChatResponse {
        success: true,
        message: "OK".into(),
        reply,
    }))
}

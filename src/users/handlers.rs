use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, ProfileResponse, PublicUser,
    RefreshRequest, SignUpRequest, UpdateProfileRequest,
};
use super::services;
use crate::auth::jwt::{AuthUser, JwtKeys};
use crate::envelope::StatusResponse;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/users/me", get(get_me).put(update_me))
        .route("/users/change-password", post(change_password))
}

fn token_pair(state: &AppState, user_id: uuid::Uuid) -> Result<(String, String), ServiceError> {
    let keys = JwtKeys::from_ref(state);
    let access = keys
        .sign_access(user_id)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    let refresh = keys
        .sign_refresh(user_id)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok((access, refresh))
}

#[instrument(skip(state, payload))]
async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let user = services::sign_up(&state, payload).await?;
    let (access_token, refresh_token) = token_pair(&state, user.id)?;
    Ok(Json(AuthResponse {
        success: true,
        message: "Account created".into(),
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let user = services::login(&state, &payload.email, &payload.password).await?;
    let (access_token, refresh_token) = token_pair(&state, user.id)?;
    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".into(),
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|_| ServiceError::validation("Invalid refresh token"))?;

    let user = services::get_profile(&state, claims.sub).await?;
    let (access_token, refresh_token) = token_pair(&state, user.id)?;
    Ok(Json(AuthResponse {
        success: true,
        message: "Token refreshed".into(),
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state))]
async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let user = services::get_profile(&state, user_id).await?;
    Ok(Json(ProfileResponse {
        success: true,
        message: "OK".into(),
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ServiceError> {
    let user = services::update_profile(&state, user_id, payload).await?;
    Ok(Json(ProfileResponse {
        success: true,
        message: "User updated successfully".into(),
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, ServiceError> {
    services::change_password(&state, user_id, payload).await?;
    Ok(Json(StatusResponse::ok("Password changed")))
}

use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{ChangePasswordRequest, SignUpRequest, UpdateProfileRequest};
use super::repo::{self, NewUser, ProfileUpdate, UserRow};
use crate::auth::{is_valid_email, password};
use crate::error::ServiceError;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

pub async fn sign_up(state: &AppState, mut req: SignUpRequest) -> Result<UserRow, ServiceError> {
    req.email = req.email.trim().to_lowercase();

    if !is_valid_email(&req.email) {
        return Err(ServiceError::validation("Invalid email"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation("Password too short"));
    }
    if req.name.trim().is_empty() {
        return Err(ServiceError::validation("Name is required"));
    }
    if repo::find_by_email(&state.db, &req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(ServiceError::validation("Email already registered"));
    }

    let hash = password::hash_password(&req.password)?;
    let row = repo::insert_with_account(
        &state.db,
        NewUser {
            name: req.name,
            email: req.email,
            password_hash: hash,
            phone_number: req.phone_number,
            facebook: req.facebook,
            twitter: req.twitter,
            google: req.google,
            job: req.job,
            date_of_birth: req.date_of_birth,
        },
    )
    .await?;

    info!(user_id = %row.id, "user signed up");
    Ok(row)
}

pub async fn login(state: &AppState, email: &str, plain: &str) -> Result<UserRow, ServiceError> {
    let email = email.trim().to_lowercase();
    let user = repo::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ServiceError::validation("Invalid credentials"))?;

    if !password::verify_password(plain, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ServiceError::validation("Invalid credentials"));
    }
    Ok(user)
}

pub async fn get_profile(state: &AppState, user_id: Uuid) -> Result<UserRow, ServiceError> {
    repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("User {user_id} not found")))
}

pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    req: UpdateProfileRequest,
) -> Result<UserRow, ServiceError> {
    if req.name.trim().is_empty() {
        return Err(ServiceError::validation("Name is required"));
    }
    repo::update_profile(
        &state.db,
        user_id,
        ProfileUpdate {
            name: req.name,
            phone_number: req.phone_number,
            facebook: req.facebook,
            twitter: req.twitter,
            google: req.google,
            job: req.job,
            date_of_birth: req.date_of_birth,
        },
    )
    .await?
    .ok_or_else(|| ServiceError::not_found(format!("User {user_id} not found")))
}

pub async fn change_password(
    state: &AppState,
    user_id: Uuid,
    req: ChangePasswordRequest,
) -> Result<(), ServiceError> {
    if req.new_password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation("New password too short"));
    }
    let user = get_profile(state, user_id).await?;
    if !password::verify_password(&req.old_password, &user.password_hash)? {
        return Err(ServiceError::validation("Old password is incorrect"));
    }
    let hash = password::hash_password(&req.new_password)?;
    if !repo::update_password_hash(&state.db, user_id, &hash).await? {
        return Err(ServiceError::not_found(format!("User {user_id} not found")));
    }
    info!(user_id = %user_id, "password changed");
    Ok(())
}

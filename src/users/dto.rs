use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::UserRow;
use crate::timefmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub google: Option<String>,
    pub job: Option<String>,
    pub date_of_birth: Option<String>,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            facebook: row.facebook,
            twitter: row.twitter,
            google: row.google,
            job: row.job,
            date_of_birth: row.date_of_birth,
            created_date: timefmt::format_wire(row.created_at),
            updated_date: row.updated_at.map(timefmt::format_wire),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub google: Option<String>,
    pub job: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone_number: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub google: Option<String>,
    pub job: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

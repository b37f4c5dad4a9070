use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::services;
use crate::auth::jwt::AuthUser;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/transactions", get(export_transactions))
}

#[derive(Debug, Deserialize)]
struct ReportParams {
    start: String,
    end: String,
}

#[instrument(skip(state))]
async fn export_transactions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ReportParams>,
) -> Result<(HeaderMap, Vec<u8>), ServiceError> {
    let (bytes, filename) = services::export(&state, user_id, &params.start, &params.end).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|err| ServiceError::Internal(format!("Bad filename header: {err}")))?,
    );
    Ok((headers, bytes))
}

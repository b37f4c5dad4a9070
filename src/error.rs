use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::envelope::StatusResponse;

/// Error taxonomy shared by all domain services.
///
/// The mobile client consumes `{success, message}` envelopes, so `NotFound` and
/// `Validation` are answered with HTTP 200 and `success: false`, the same wire
/// shape the app already handles. Infrastructure failures become 500s.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("external service error: {0}")]
    External(String),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) | ServiceError::Validation(_) => StatusCode::OK,
            ServiceError::Database(_) | ServiceError::External(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = StatusResponse {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_validation_keep_http_200() {
        let res = ServiceError::not_found("budget not found").into_response();
        assert_eq!(res.status(), StatusCode::OK);

        let res = ServiceError::validation("amount must be a number").into_response();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        let res = ServiceError::External("gemini timed out".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = ServiceError::Internal("boom".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

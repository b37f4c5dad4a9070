use axum::{
    extract::{Multipart, Query, State},
    routing::post,
    Json, Router,
};
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;
use tracing::instrument;

use super::dto::ReceiptScanResponse;
use super::services;
use crate::auth::jwt::AuthUser;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/receipts/scan", post(scan_receipt))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScanParams {
    #[serde(default)]
    embed_image: bool,
}

#[instrument(skip(state, multipart))]
async fn scan_receipt(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<ScanParams>,
    mut multipart: Multipart,
) -> Result<Json<ReceiptScanResponse>, ServiceError> {
    let mut image: Option<(Bytes, String)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServiceError::validation(format!("Invalid multipart body: {err}")))?
    {
        if field.name() == Some("file") {
            let mime = field
                .content_type()
                .unwrap_or("image/jpeg")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|err| ServiceError::validation(format!("Unreadable upload: {err}")))?;
            image = Some((data, mime));
        }
    }
    let Some((data, mime)) = image.filter(|(data, _)| !data.is_empty()) else {
        return Err(ServiceError::validation("No file was uploaded"));
    };

    let embedded = params
        .embed_image
        .then(|| base64::engine::general_purpose::STANDARD.encode(&data));
    let transactions = services::scan(&state, data, &mime).await?;

    let (success, message) = if transactions.is_empty() {
        (
            false,
            "Could not read the receipt. Try again with a clearer photo.".to_string(),
        )
    } else {
        (true, "Receipt processed".to_string())
    };
    Ok(Json(ReceiptScanResponse {
        success,
        message,
        transactions,
        image: embedded,
    }))
}

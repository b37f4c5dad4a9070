use serde::{Deserialize, Serialize};

/// A transaction candidate extracted from a receipt image. Nothing is
/// persisted; the client saves the rows it keeps through `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTransaction {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub note: Option<String>,
}

/// Shape the model is asked to produce, one object per receipt line. The
/// amount is an f64 because the model sends `20000.0` often enough.
#[derive(Debug, Deserialize)]
pub struct ExtractedItem {
    #[serde(default)]
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReceiptScanResponse {
    pub success: bool,
    pub message: String,
    pub transactions: Vec<DraftTransaction>,
    /// Original upload echoed back as base64 when the caller sets `embedImage`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

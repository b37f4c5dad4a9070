use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::TransactionRow;
use crate::{money, timefmt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub transaction_id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub note: Option<String>,
    pub created_date: String,
    pub updated_date: Option<String>,
}

impl From<TransactionRow> for TransactionDto {
    fn from(row: TransactionRow) -> Self {
        Self {
            transaction_id: row.id,
            user_id: row.user_id,
            category_id: row.category_id,
            kind: row.kind,
            amount: money::format_amount(row.amount),
            note: row.note,
            created_date: timefmt::format_wire(row.created_at),
            updated_date: row.updated_at.map(timefmt::format_wire),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub success: bool,
    pub message: String,
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub success: bool,
    pub message: String,
    pub transaction: TransactionDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_preserves_the_amount_string_verbatim() {
        let dto = TransactionDto {
            transaction_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            kind: "expense".into(),
            amount: "1234567".into(),
            note: Some("lunch".into()),
            created_date: "07/03/2025 12:00:00".into(),
            updated_date: None,
        };
        let json = serde_json::to_string(&dto).unwrap();
        let back: TransactionDto = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dto);
        assert_eq!(back.amount, "1234567");
    }

    #[test]
    fn kind_serializes_under_the_legacy_type_key() {
        let dto = TransactionDto {
            transaction_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            kind: "income".into(),
            amount: "5".into(),
            note: None,
            created_date: "01/01/2025 00:00:00".into(),
            updated_date: None,
        };
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v["type"], "income");
        assert!(v.get("kind").is_none());
    }
}

use tracing::info;
use uuid::Uuid;

use super::dto::{CreateTransactionRequest, UpdateTransactionRequest};
use super::repo::{self, NewTransaction, TransactionRow, TransactionUpdate};
use crate::accounts;
use crate::error::ServiceError;
use crate::events::DomainEvent;
use crate::money;
use crate::state::AppState;

pub const KIND_INCOME: &str = "income";
pub const KIND_EXPENSE: &str = "expense";

/// The legacy clients send `Income`, `INCOME` and `income` interchangeably;
/// everything is stored lowercase.
pub fn normalize_kind(raw: &str) -> Result<&'static str, ServiceError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        KIND_INCOME => Ok(KIND_INCOME),
        KIND_EXPENSE => Ok(KIND_EXPENSE),
        _ => Err(ServiceError::validation(format!(
            "invalid transaction type \"{raw}\": expected income or expense"
        ))),
    }
}

pub async fn list(state: &AppState, user_id: Uuid) -> Result<Vec<TransactionRow>, ServiceError> {
    Ok(repo::list_by_user(&state.db, user_id).await?)
}

/// Records a transaction and applies its signed amount to the account balance
/// in one transaction; an expense that would overdraw the account is rejected.
pub async fn create(
    state: &AppState,
    user_id: Uuid,
    req: CreateTransactionRequest,
) -> Result<TransactionRow, ServiceError> {
    let amount = money::parse_positive_amount(&req.amount)?;
    let kind = normalize_kind(&req.kind)?;
    let delta = if kind == KIND_INCOME { amount } else { -amount };

    let mut tx = state.db.begin().await?;
    accounts::services::adjust_balance(&mut tx, user_id, delta).await?;
    let row = repo::insert_tx(
        &mut tx,
        NewTransaction {
            user_id,
            category_id: req.category_id,
            kind: kind.to_string(),
            amount,
            note: req.note,
        },
    )
    .await?;
    tx.commit().await?;

    let _ = state
        .events
        .publish(DomainEvent::TransactionRecorded { user_id })
        .await;

    info!(transaction_id = %row.id, %user_id, kind, "transaction recorded");
    Ok(row)
}

/// Whole-field replacement; the account balance is not recomputed (matching
/// the mobile app's contract, which treats edits as corrections of record).
pub async fn update(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    req: UpdateTransactionRequest,
) -> Result<TransactionRow, ServiceError> {
    let amount = money::parse_positive_amount(&req.amount)?;
    let kind = normalize_kind(&req.kind)?;

    let existing = repo::find(&state.db, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Transaction {id} not found")))?;
    if existing.user_id != user_id {
        return Err(ServiceError::not_found(format!("Transaction {id} not found")));
    }

    let row = repo::update(
        &state.db,
        id,
        TransactionUpdate {
            category_id: req.category_id,
            kind: kind.to_string(),
            amount,
            note: req.note,
        },
    )
    .await?
    .ok_or_else(|| ServiceError::not_found(format!("Transaction {id} not found")))?;

    let _ = state
        .events
        .publish(DomainEvent::TransactionUpdated { user_id })
        .await;

    Ok(row)
}

pub async fn delete(state: &AppState, id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
    if !repo::delete_for_user(&state.db, id, user_id).await? {
        return Err(ServiceError::not_found(format!("Transaction {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_normalized_case_insensitively() {
        assert_eq!(normalize_kind("income").unwrap(), "income");
        assert_eq!(normalize_kind("Income").unwrap(), "income");
        assert_eq!(normalize_kind("EXPENSE").unwrap(), "expense");
        assert_eq!(normalize_kind(" expense ").unwrap(), "expense");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(normalize_kind("transfer").is_err());
        assert!(normalize_kind("").is_err());
    }
}

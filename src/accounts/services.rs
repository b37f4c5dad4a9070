use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::repo::{self, AccountRow, AdjustOutcome};
use crate::error::ServiceError;
use crate::state::AppState;

pub async fn get_account(state: &AppState, user_id: Uuid) -> Result<AccountRow, ServiceError> {
    repo::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Account not found"))
}

pub async fn delete_account(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<(), ServiceError> {
    if !repo::delete_for_user(&state.db, id, user_id).await? {
        return Err(ServiceError::not_found("Account not found"));
    }
    Ok(())
}

/// Balance mutation shared by transactions and saving goals. Must run inside
/// the caller's transaction so the balance change commits with the write that
/// caused it.
pub async fn adjust_balance(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    delta: i64,
) -> Result<i64, ServiceError> {
    match repo::adjust_balance_tx(tx, user_id, delta).await? {
        None => Err(ServiceError::not_found("Account not found for this user")),
        Some(AdjustOutcome::Insufficient { .. }) => Err(ServiceError::validation(
            "Insufficient balance for this operation",
        )),
        Some(AdjustOutcome::Applied { new_balance }) => Ok(new_balance),
    }
}

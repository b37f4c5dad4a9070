use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<AccountRow>> {
    sqlx::query_as::<_, AccountRow>(
        "SELECT id, user_id, balance, created_at, updated_at FROM accounts WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn delete_for_user(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Applies a signed delta to the user's balance inside an open transaction.
/// Returns the new balance, `Ok(None)` when the account does not exist, and
/// leaves the row untouched when the result would go negative.
pub async fn adjust_balance_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    delta: i64,
) -> sqlx::Result<Option<AdjustOutcome>> {
    let current: Option<i64> =
        sqlx::query_scalar("SELECT balance FROM accounts WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;

    let Some(balance) = current else {
        return Ok(None);
    };

    let new_balance = balance + delta;
    if new_balance < 0 {
        return Ok(Some(AdjustOutcome::Insufficient { balance }));
    }

    sqlx::query("UPDATE accounts SET balance = $2, updated_at = $3 WHERE user_id = $1")
        .bind(user_id)
        .bind(new_balance)
        .bind(OffsetDateTime::now_utc())
        .execute(&mut **tx)
        .await?;

    Ok(Some(AdjustOutcome::Applied { new_balance }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    Applied { new_balance: i64 },
    Insufficient { balance: i64 },
}

use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub kind: String,
    pub amount: i64,
    pub note: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub kind: String,
    pub amount: i64,
    pub note: Option<String>,
}

pub struct TransactionUpdate {
    pub category_id: Uuid,
    pub kind: String,
    pub amount: i64,
    pub note: Option<String>,
}

const COLUMNS: &str = "id, user_id, category_id, kind, amount, note, created_at, updated_at";

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<TransactionRow>> {
    sqlx::query_as::<_, TransactionRow>(&format!(
        "SELECT {COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Transactions created inside `[from, to]`, oldest first, for report export.
pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> sqlx::Result<Vec<TransactionRow>> {
    sqlx::query_as::<_, TransactionRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM transactions
        WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3
        ORDER BY created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
}

pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<TransactionRow>> {
    sqlx::query_as::<_, TransactionRow>(&format!(
        "SELECT {COLUMNS} FROM transactions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    new: NewTransaction,
) -> sqlx::Result<TransactionRow> {
    sqlx::query_as::<_, TransactionRow>(&format!(
        r#"
        INSERT INTO transactions (id, user_id, category_id, kind, amount, note, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.category_id)
    .bind(&new.kind)
    .bind(new.amount)
    .bind(&new.note)
    .bind(OffsetDateTime::now_utc())
    .fetch_one(&mut **tx)
    .await
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    update: TransactionUpdate,
) -> sqlx::Result<Option<TransactionRow>> {
    sqlx::query_as::<_, TransactionRow>(&format!(
        r#"
        UPDATE transactions
        SET category_id = $2, kind = $3, amount = $4, note = $5, updated_at = $6
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(update.category_id)
    .bind(&update.kind)
    .bind(update.amount)
    .bind(&update.note)
    .bind(OffsetDateTime::now_utc())
    .fetch_optional(db)
    .await
}

pub async fn delete_for_user(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

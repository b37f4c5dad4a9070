use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct BudgetRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub initial_amount: i64,
    pub current_amount: i64,
    pub start_at: OffsetDateTime,
    pub end_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub initial_amount: i64,
    pub current_amount: i64,
    pub start_at: OffsetDateTime,
    pub end_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

const COLUMNS: &str = "id, user_id, category_id, initial_amount, current_amount, start_at, \
                       end_at, created_at, updated_at";

/// Budgets a user created inside `[from, to)`. The month filter lives in SQL
/// so out-of-month rows never leave the store.
pub async fn list_created_between(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> sqlx::Result<Vec<BudgetRow>> {
    sqlx::query_as::<_, BudgetRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM budgets
        WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
        ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
}

/// Same window, all users. Used by the month rollover.
pub async fn list_all_created_between(
    db: &PgPool,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> sqlx::Result<Vec<BudgetRow>> {
    sqlx::query_as::<_, BudgetRow>(&format!(
        "SELECT {COLUMNS} FROM budgets WHERE created_at >= $1 AND created_at < $2"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
}

pub async fn latest_created(db: &PgPool) -> sqlx::Result<Option<BudgetRow>> {
    sqlx::query_as::<_, BudgetRow>(&format!(
        "SELECT {COLUMNS} FROM budgets ORDER BY created_at DESC LIMIT 1"
    ))
    .fetch_optional(db)
    .await
}

pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<BudgetRow>> {
    sqlx::query_as::<_, BudgetRow>(&format!("SELECT {COLUMNS} FROM budgets WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &PgPool, budget: NewBudget) -> sqlx::Result<BudgetRow> {
    sqlx::query_as::<_, BudgetRow>(&format!(
        r#"
        INSERT INTO budgets (id, user_id, category_id, initial_amount, current_amount,
                             start_at, end_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(budget.user_id)
    .bind(budget.category_id)
    .bind(budget.initial_amount)
    .bind(budget.current_amount)
    .bind(budget.start_at)
    .bind(budget.end_at)
    .bind(budget.created_at)
    .bind(budget.updated_at)
    .fetch_one(db)
    .await
}

pub async fn insert_many_tx(
    tx: &mut Transaction<'_, Postgres>,
    budgets: &[NewBudget],
) -> sqlx::Result<()> {
    for b in budgets {
        sqlx::query(
            r#"
            INSERT INTO budgets (id, user_id, category_id, initial_amount, current_amount,
                                 start_at, end_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(b.user_id)
        .bind(b.category_id)
        .bind(b.initial_amount)
        .bind(b.current_amount)
        .bind(b.start_at)
        .bind(b.end_at)
        .bind(b.created_at)
        .bind(b.updated_at)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn set_current_amount(db: &PgPool, id: Uuid, value: i64) -> sqlx::Result<()> {
    sqlx::query("UPDATE budgets SET current_amount = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(value)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
    Ok(())
}

pub async fn set_initial_amount(db: &PgPool, id: Uuid, value: i64) -> sqlx::Result<()> {
    sqlx::query("UPDATE budgets SET initial_amount = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(value)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete_for_user(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM budgets WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct GoalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: Option<OffsetDateTime>,
}

const COLUMNS: &str = "id, user_id, category_id, title, target_amount, current_amount, deadline, \
                       created_at, updated_at";

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<GoalRow>> {
    sqlx::query_as::<_, GoalRow>(&format!(
        "SELECT {COLUMNS} FROM saving_goals WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<GoalRow>> {
    sqlx::query_as::<_, GoalRow>(&format!("SELECT {COLUMNS} FROM saving_goals WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert(db: &PgPool, goal: NewGoal) -> sqlx::Result<GoalRow> {
    sqlx::query_as::<_, GoalRow>(&format!(
        r#"
        INSERT INTO saving_goals (id, user_id, category_id, title, target_amount,
                                  current_amount, deadline, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(goal.user_id)
    .bind(goal.category_id)
    .bind(&goal.title)
    .bind(goal.target_amount)
    .bind(goal.current_amount)
    .bind(goal.deadline)
    .bind(OffsetDateTime::now_utc())
    .fetch_one(db)
    .await
}

pub async fn set_current_amount_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    value: i64,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE saving_goals SET current_amount = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(value)
        .bind(OffsetDateTime::now_utc())
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn delete_for_user(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM saving_goals WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

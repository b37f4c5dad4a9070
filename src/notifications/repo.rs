use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, content, is_read, created_at";

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<NotificationRow>> {
    sqlx::query_as::<_, NotificationRow>(&format!(
        "SELECT {COLUMNS} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn insert(db: &PgPool, user_id: Uuid, content: &str) -> sqlx::Result<NotificationRow> {
    sqlx::query_as::<_, NotificationRow>(&format!(
        r#"
        INSERT INTO notifications (id, user_id, content, is_read, created_at)
        VALUES ($1, $2, $3, FALSE, $4)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .bind(OffsetDateTime::now_utc())
    .fetch_one(db)
    .await
}

pub async fn mark_read(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_for_user(db: &PgPool, id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

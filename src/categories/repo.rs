use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<CategoryRow>> {
    sqlx::query_as::<_, CategoryRow>(
        "SELECT id, name, icon, created_at, updated_at FROM categories ORDER BY name",
    )
    .fetch_all(db)
    .await
}

/// id → name lookup used by the report renderer.
pub async fn name_lookup(db: &PgPool) -> sqlx::Result<HashMap<Uuid, String>> {
    let rows = list_all(db).await?;
    Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
}

pub async fn insert(db: &PgPool, name: &str, icon: Option<&str>) -> sqlx::Result<CategoryRow> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        INSERT INTO categories (id, name, icon, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, icon, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(icon)
    .bind(OffsetDateTime::now_utc())
    .fetch_one(db)
    .await
}

pub async fn update(
    db: &PgPool,
    id: Uuid,
    name: &str,
    icon: Option<&str>,
) -> sqlx::Result<Option<CategoryRow>> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        UPDATE categories
        SET name = $2, icon = $3, updated_at = $4
        WHERE id = $1
        RETURNING id, name, icon, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(icon)
    .bind(OffsetDateTime::now_utc())
    .fetch_optional(db)
    .await
}

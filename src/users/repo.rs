use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub google: Option<String>,
    pub job: Option<String>,
    pub date_of_birth: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub google: Option<String>,
    pub job: Option<String>,
    pub date_of_birth: Option<String>,
}

pub struct ProfileUpdate {
    pub name: String,
    pub phone_number: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub google: Option<String>,
    pub job: Option<String>,
    pub date_of_birth: Option<String>,
}

const COLUMNS: &str = "id, name, email, password_hash, phone_number, facebook, twitter, google, \
                       job, date_of_birth, created_at, updated_at";

pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Inserts the user and their zero-balance money account in one transaction.
pub async fn insert_with_account(db: &PgPool, user: NewUser) -> sqlx::Result<UserRow> {
    let now = OffsetDateTime::now_utc();
    let mut tx = db.begin().await?;

    let row = sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (id, name, email, password_hash, phone_number, facebook, twitter,
                           google, job, date_of_birth, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.phone_number)
    .bind(&user.facebook)
    .bind(&user.twitter)
    .bind(&user.google)
    .bind(&user.job)
    .bind(&user.date_of_birth)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO accounts (id, user_id, balance, created_at)
        VALUES ($1, $2, 0, $3)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(row.id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

pub async fn update_profile(
    db: &PgPool,
    id: Uuid,
    update: ProfileUpdate,
) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        UPDATE users
        SET name = $2, phone_number = $3, facebook = $4, twitter = $5, google = $6,
            job = $7, date_of_birth = $8, updated_at = $9
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&update.name)
    .bind(&update.phone_number)
    .bind(&update.facebook)
    .bind(&update.twitter)
    .bind(&update.google)
    .bind(&update.job)
    .bind(&update.date_of_birth)
    .bind(OffsetDateTime::now_utc())
    .fetch_optional(db)
    .await
}

pub async fn update_password_hash(db: &PgPool, id: Uuid, hash: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(hash)
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, never exposed in JSON
    pub photo: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Canonical form of an email used for uniqueness and lookup. Applied on
/// every read and write path so no caller has to remember to do it.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Translate an insert failure: a unique-index violation means the email is
/// already taken, anything else is an internal fault.
fn map_insert_error(e: sqlx::Error) -> ApiError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => ApiError::DuplicateEmail,
        _ => ApiError::Internal(e.into()),
    }
}

impl User {
    /// Insert a new user. Duplicate detection relies on the unique index on
    /// `lower(email)`, so concurrent signups with the same address cannot
    /// both succeed.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        photo: Option<&str>,
    ) -> Result<User, ApiError> {
        let email = normalize_email(email);
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, photo)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, photo, created_at
            "#,
        )
        .bind(name)
        .bind(&email)
        .bind(password_hash)
        .bind(photo)
        .fetch_one(db)
        .await
        .map_err(map_insert_error)?;
        Ok(user)
    }

    /// Find a user by email; only the login path uses this.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let email = normalize_email(email);
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, photo, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by ID; used by all token-authenticated routes.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, photo, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Partial update of the mutable fields. Email and password hash are
    /// untouchable here. A missing `id` updates zero rows and is not an
    /// error.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        photo: Option<&str>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                photo = COALESCE($3, photo)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(photo)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Remove the record; a missing `id` is a no-op.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

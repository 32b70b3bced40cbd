use crate::auth::repo_types::User;
use anyhow::Context;
use sqlx::AnyPool;

impl User {
    /// Find a user by exact email.
    pub async fn find_by_email(db: &AnyPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Insert a new user. The raw sqlx error is returned so callers can tell a
    /// unique-constraint violation apart from other failures.
    pub async fn create(db: &AnyPool, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}

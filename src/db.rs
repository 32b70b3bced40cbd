use anyhow::Context;
use sqlx::{any::AnyPoolOptions, AnyPool};

use crate::config::AppConfig;

/// SQL flavour of the configured store. Only schema bootstrap cares; queries are portable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        if url.starts_with("sqlite:") {
            Ok(Dialect::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Dialect::Postgres)
        } else {
            // The url may carry credentials, so only the scheme goes into the error.
            let scheme = url.split(':').next().unwrap_or_default();
            anyhow::bail!("unsupported database scheme `{scheme}`")
        }
    }

    fn create_users_sql(self) -> &'static str {
        match self {
            Dialect::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    email         VARCHAR(120) NOT NULL UNIQUE,
                    password_hash VARCHAR(255) NOT NULL
                )
                "#
            }
            Dialect::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id            BIGSERIAL PRIMARY KEY,
                    email         VARCHAR(120) NOT NULL UNIQUE,
                    password_hash VARCHAR(255) NOT NULL
                )
                "#
            }
        }
    }
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<(AnyPool, Dialect)> {
    let dialect = Dialect::from_url(&config.database_url)?;
    sqlx::any::install_default_drivers();

    let db = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;

    tracing::info!(?dialect, max_connections = config.max_connections, "database pool ready");
    Ok((db, dialect))
}

/// Creates the `users` table if it is missing. This is the only schema change the service makes.
pub async fn ensure_schema(db: &AnyPool, dialect: Dialect) -> anyhow::Result<()> {
    sqlx::query(dialect.create_users_sql())
        .execute(db)
        .await
        .context("create users table")?;
    Ok(())
}

/// Single-connection in-memory SQLite pool with the schema applied.
#[cfg(test)]
pub(crate) async fn in_memory() -> anyhow::Result<AnyPool> {
    sqlx::any::install_default_drivers();
    // Every sqlite memory connection is its own database, so the one connection must never be recycled.
    let db = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("open in-memory sqlite")?;
    ensure_schema(&db, Dialect::Sqlite).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_from_url() {
        assert_eq!(Dialect::from_url("sqlite://database.db?mode=rwc").unwrap(), Dialect::Sqlite);
        assert_eq!(Dialect::from_url("sqlite::memory:").unwrap(), Dialect::Sqlite);
        assert_eq!(Dialect::from_url("postgres://u:p@h/db").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_url("postgresql://u:p@h/db").unwrap(), Dialect::Postgres);
    }

    #[test]
    fn unsupported_scheme_does_not_leak_credentials() {
        let err = Dialect::from_url("mysql://root:hunter2@h/db").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mysql"));
        assert!(!msg.contains("hunter2"));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let db = in_memory().await.expect("in-memory db");
        ensure_schema(&db, Dialect::Sqlite).await.expect("second run");
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&db)
            .await
            .expect("count users");
        assert_eq!(count, 0);
    }
}

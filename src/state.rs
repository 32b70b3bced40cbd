use crate::config::AppConfig;
use crate::db;
use sqlx::AnyPool;

#[derive(Clone)]
pub struct AppState {
    pub db: AnyPool,
}

impl AppState {
    /// Connects to the configured store and makes sure the `users` table exists.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let (db, dialect) = db::connect(config).await?;
        db::ensure_schema(&db, dialect).await?;
        Ok(Self { db })
    }

    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let db = db::in_memory().await.expect("in-memory db");
        Self { db }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn init_connects_and_bootstraps_schema() {
        let config = AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
        };
        let state = AppState::init(&config).await.expect("init state");
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&state.db)
            .await
            .expect("users table exists");
        assert_eq!(count, 0);
    }
}

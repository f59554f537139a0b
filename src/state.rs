use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        db::migrate(&db).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    #[cfg(test)]
    pub async fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            static_dir: "./frontend".into(),
        });
        Self::from_parts(db::in_memory().await, config)
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/users.db".into());
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => 8080,
        };
        Ok(Self {
            database_url,
            db_max_connections,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "./frontend".into()),
        })
    }
}

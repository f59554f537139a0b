use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Columns added after the first release; older databases lack them.
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("date_naissance", "TEXT"),
    ("niveau_natation", "TEXT"),
];

pub async fn connect(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("parse DATABASE_URL {}", config.database_url))?
        .create_if_missing(true);

    if let Some(parent) = database_file(&config.database_url).and_then(|p| p.parent().map(PathBuf::from)) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(&parent)
                .await
                .with_context(|| format!("create database dir {}", parent.display()))?;
        }
    }

    let db = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// On-disk file behind a `sqlite:` URL, `None` for in-memory databases.
fn database_file(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Brings the schema up to date. Safe to run against an already migrated store.
pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;

    for (column, ty) in ADDITIVE_COLUMNS {
        let stmt = format!("ALTER TABLE users ADD COLUMN {} {}", column, ty);
        match sqlx::query(&stmt).execute(db).await {
            Ok(_) => info!(column, "added column to users"),
            Err(e) if is_duplicate_column(&e) => debug!(column, "column already present"),
            Err(e) => return Err(e).with_context(|| format!("add column {}", column)),
        }
    }
    Ok(())
}

fn is_duplicate_column(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(e) => e.message().contains("duplicate column name"),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) async fn in_memory() -> SqlitePool {
    // A single long-lived connection: every new `:memory:` connection is a fresh database.
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    migrate(&db).await.expect("migrate in-memory sqlite");
    db
}

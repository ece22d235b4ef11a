use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// State over a fresh in-memory SQLite database with the schema synced.
pub async fn memory_state() -> anyhow::Result<Arc<AppState>> {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig {
        url: MEMORY_DATABASE_URL.to_string(),
        max_connections: 1,
        min_idle: 1,
    };
    let db = connection::connect(&cfg.database).await?;
    Ok(AppState::new(cfg, db))
}

/// Full middleware stack over an arbitrary connection, e.g. a `MockDatabase`.
pub fn test_app(db: DatabaseConnection) -> Router {
    app(AppState::new(AppConfig::default(), db))
}

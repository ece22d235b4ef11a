use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, connect_options};
use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

pub struct SqliteDbProvider;

#[async_trait]
impl DbProvider for SqliteDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Sqlite
    }

    fn supports_url(&self, url: &str) -> bool {
        url.trim().to_ascii_lowercase().starts_with("sqlite:")
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut options = connect_options(cfg);
        // applied to every connection the pool opens, not just the first
        options.map_sqlx_sqlite_opts(|opts| opts.busy_timeout(SQLITE_BUSY_TIMEOUT));
        // every pooled connection to :memory: opens its own empty database
        if is_in_memory(&cfg.url) {
            options.max_connections(1).min_connections(1);
        }
        Ok(Database::connect(options).await?)
    }
}

fn is_in_memory(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.contains(":memory:") || url.contains("mode=memory")
}

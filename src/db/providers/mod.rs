mod postgres;
mod registry;
mod sqlite;

use std::sync::Arc;

pub use registry::{DbProvider, DbProviderId, DbProviders, redact_url};

use self::{postgres::PostgresDbProvider, sqlite::SqliteDbProvider};

/// Registry with every backend the `todos` table can live in.
pub fn default_registry() -> anyhow::Result<DbProviders> {
    DbProviders::new()
        .with_provider(Arc::new(SqliteDbProvider))?
        .with_provider(Arc::new(PostgresDbProvider))
}

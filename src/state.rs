use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, services::TodoService};

/// Shared by every handler. The connection handle is injected here once at
/// startup; nothing reaches for global state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { config, db })
    }

    pub fn todos(&self) -> TodoService {
        TodoService::from_db(&self.db)
    }
}

use sea_orm::DatabaseConnection;

use crate::bootstrap::config::WorkflowConfig;

/// Shared handler state: the connection pool and the workflow policy.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub workflow: WorkflowConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, workflow: WorkflowConfig) -> Self {
        Self { db, workflow }
    }
}

//! Top-level application error for startup and server lifecycle.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(Box<sea_orm::DbErr>),

    #[error("Migration error: {0}")]
    Migration(Box<sea_orm::DbErr>),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

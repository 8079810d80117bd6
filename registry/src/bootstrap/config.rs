//! Environment-driven application configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;
use crate::utils::env::{
    env_bool, env_duration_secs, env_path, env_string, env_string_opt, env_u16, env_u32, env_u64,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub workflow: WorkflowConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub rest_port: u16,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub logging_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
}

/// Catalog workflow policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowConfig {
    /// When true, a Rejected record may transition back to Submitted.
    pub allow_resubmission: bool,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub enabled: bool,
    /// Directory holding sites.json, artifacts.json, catalogRecords.*.json
    /// and an Images/ subdirectory.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = env_string_opt("REGISTRY_JWT_SECRET")
            .ok_or_else(|| AppError::Config("REGISTRY_JWT_SECRET is not set".to_string()))?;

        Ok(Self {
            server: ServerConfig {
                rest_port: env_u16("REGISTRY_REST_PORT", 8080),
            },
            db: DbConfig {
                url: env_string("DATABASE_URL", "postgres://localhost/aeon_registry"),
                max_connections: env_u32("DATABASE_MAX_CONNECTIONS", 10),
                min_connections: env_u32("DATABASE_MIN_CONNECTIONS", 1),
                connect_timeout: env_duration_secs("DATABASE_CONNECT_TIMEOUT_SECS", 10),
                idle_timeout: env_duration_secs("DATABASE_IDLE_TIMEOUT_SECS", 300),
                max_lifetime: env_duration_secs("DATABASE_MAX_LIFETIME_SECS", 1800),
                logging_enabled: env_bool("DATABASE_LOGGING", false),
            },
            cors: CorsConfig {
                allowed_origins: env_string("REGISTRY_CORS_ORIGINS", "http://localhost:3000")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: env_bool("REGISTRY_CORS_ALLOW_CREDENTIALS", false),
            },
            auth: AuthConfig {
                jwt_secret,
                token_expiry_hours: env_u64("REGISTRY_TOKEN_EXPIRY_HOURS", 24) as i64,
            },
            workflow: WorkflowConfig {
                allow_resubmission: env_bool("REGISTRY_ALLOW_RESUBMISSION", false),
            },
            seed: SeedConfig {
                enabled: env_bool("REGISTRY_SEED_ENABLED", false),
                data_dir: env_path("REGISTRY_SEED_DIR", "data/seed"),
            },
        })
    }
}

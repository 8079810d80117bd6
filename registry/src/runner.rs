//! Application startup: tracing, configuration, database, seeding, server.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};
use tracing::info;

use crate::api::servers::{app_state::AppState, rest};
use crate::bootstrap::config::Config;
use crate::errors::AppError;
use crate::modules::access::jwt;
use crate::modules::seed::SeedService;

pub async fn run() -> Result<(), AppError> {
    init_tracing();

    let config = Config::from_env()?;
    info!("Configuration loaded. Initializing registry...");

    jwt::init_jwt_secret(&config.auth.jwt_secret);

    let db_conn = setup_database(&config).await?;

    if config.seed.enabled {
        info!(dir = %config.seed.data_dir.display(), "Seeding enabled, importing seed data");
        SeedService::new(&db_conn)
            .run(&config.seed.data_dir)
            .await
            .map_err(|e| AppError::Seed(e.to_string()))?;
    }

    let app_state = AppState::new(db_conn, config.workflow);
    rest::start(app_state, &config).await
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

async fn setup_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    info!("Setting up database");

    let db_config = &config.db;
    let mut opt = ConnectOptions::new(&db_config.url);

    opt.max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .connect_timeout(db_config.connect_timeout)
        .idle_timeout(db_config.idle_timeout)
        .max_lifetime(db_config.max_lifetime)
        .sqlx_logging(db_config.logging_enabled);

    let connection = sea_orm::Database::connect(opt)
        .await
        .map_err(|db_err| AppError::Storage(Box::new(db_err)))?;

    info!("Running database migrations...");
    Migrator::up(&connection, None)
        .await
        .map_err(|db_err| AppError::Migration(Box::new(db_err)))?;

    Ok(connection)
}

//! REST API router configuration.
//!
//! This module contains route definitions and server startup logic.
//! All handler implementations are in their respective submodules.

mod artifacts;
mod catalog;
mod health;
mod media;
mod sites;

use crate::api::servers::app_state::AppState;
use crate::bootstrap::config::Config;
use crate::errors::AppError;
use axum::routing::{get, post};
use axum::Router;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the REST API router with all routes.
pub fn build_router(app_state: AppState, config: &Config) -> Router {
    let cors = build_cors_layer(config);

    Router::new()
        // Health
        .route("/api/health", get(health::check))
        // Sites - public
        .route("/api/public/sites", get(sites::list_public))
        .route("/api/public/sites/{id}", get(sites::get_public))
        .route(
            "/api/public/sites/{id}/artifacts",
            get(artifacts::list_public_by_site),
        )
        // Sites - private
        .route(
            "/api/private/sites",
            get(sites::list_private).post(sites::create),
        )
        .route(
            "/api/private/sites/{id}",
            get(sites::get_private)
                .put(sites::update)
                .delete(sites::delete),
        )
        .route(
            "/api/private/sites/{id}/artifacts",
            get(artifacts::list_private_by_site),
        )
        // Artifacts - public
        .route("/api/public/artifacts", get(artifacts::list_public))
        .route("/api/public/artifacts/{id}", get(artifacts::get_public))
        .route("/api/public/artifacts/images/{id}", get(media::get_image))
        // Artifacts - private
        .route(
            "/api/private/artifacts",
            get(artifacts::list_private).post(artifacts::create),
        )
        .route(
            "/api/private/artifacts/{id}",
            get(artifacts::get_private)
                .put(artifacts::update)
                .delete(artifacts::delete),
        )
        .route(
            "/api/private/artifacts/{id}/images",
            post(media::upload),
        )
        // Catalog workflow - private
        .route("/api/private/catalog-records", post(catalog::create))
        .route("/api/private/catalog-records/{id}", get(catalog::get))
        .route(
            "/api/private/catalog-records/{id}/submit",
            post(catalog::submit),
        )
        .route(
            "/api/private/catalog-records/{id}/verify",
            post(catalog::verify),
        )
        .route(
            "/api/private/catalog-records/{id}/reject",
            post(catalog::reject),
        )
        .route(
            "/api/private/catalog-records/{id}/notes",
            post(catalog::add_note),
        )
        .with_state(app_state)
        .layer(cors)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, ACCEPT, CONTENT_TYPE, AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600));

    if config.cors.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    cors
}

/// Start the REST server.
pub async fn start(app_state: AppState, config: &Config) -> Result<(), AppError> {
    let app = build_router(app_state, config);
    let bind_addr = format!("0.0.0.0:{}", config.server.rest_port);

    info!("Starting REST server on {}", &bind_addr);
    info!("CORS allowed origins: {:?}", config.cors.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

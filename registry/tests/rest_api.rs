//! HTTP-level tests: routing, auth rejection, projection redaction and
//! error-status mapping, driven through the real router with `oneshot`.

mod common;

use std::path::PathBuf;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use registry::api::servers::app_state::AppState;
use registry::api::servers::rest;
use registry::bootstrap::config::{
    AuthConfig, Config, CorsConfig, DbConfig, SeedConfig, ServerConfig, WorkflowConfig,
};
use registry::modules::access::jwt::{self, Claims};
use registry::modules::catalog::CatalogService;
use registry::modules::media::{MediaService, MediaUpload};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server: ServerConfig { rest_port: 0 },
        db: DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(5),
            max_lifetime: Duration::from_secs(60),
            logging_enabled: false,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: false,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_expiry_hours: 1,
        },
        workflow: WorkflowConfig {
            allow_resubmission: false,
        },
        seed: SeedConfig {
            enabled: false,
            data_dir: PathBuf::from("unused"),
        },
    }
}

async fn setup_router() -> (Router, DatabaseConnection) {
    jwt::init_jwt_secret("test-secret");
    let db = common::setup_db().await;
    let config = test_config();
    let router = rest::build_router(AppState::new(db.clone(), config.workflow), &config);
    (router, db)
}

fn token_for(user_id: &str, email: &str, roles: &[&str]) -> String {
    let claims = Claims::new(
        user_id,
        email,
        roles.iter().map(|r| r.to_string()).collect(),
        vec![],
        1,
    );
    jwt::generate_token(&claims).expect("generate token")
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let (router, _db) = setup_router().await;

    let (status, body) = send(&router, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn private_routes_require_a_token() {
    let (router, _db) = setup_router().await;

    let (status, _) = send(&router, Method::GET, "/api/private/sites", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &router,
        Method::GET,
        "/api/private/sites",
        Some("garbage"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_site_view_redacts_internal_fields() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/public/sites/{}", site.id),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gobekli Tepe");
    assert_eq!(body["publicNarrative"], "An ancient hilltop sanctuary.");
    assert_eq!(body["description"], "Internal survey notes");
    assert!(body.get("aeonNarrative").is_none());
}

#[tokio::test]
async fn private_site_view_includes_internal_fields() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let token = token_for("u1", "viewer@aeon.org", &["Viewer"]);

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/private/sites/{}", site.id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aeonNarrative"], "Restricted commentary");
}

#[tokio::test]
async fn missing_site_maps_to_404() {
    let (router, _db) = setup_router().await;

    let (status, body) = send(&router, Method::GET, "/api/public/sites/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    // Same for the artifacts-of-site listing.
    let (status, _) = send(
        &router,
        Method::GET,
        "/api/public/sites/999/artifacts",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn site_create_roundtrip_over_http() {
    let (router, _db) = setup_router().await;
    let token = token_for("u1", "admin@aeon.org", &["Admin"]);

    let payload = json!({
        "name": "Nan Madol",
        "location": "Micronesia",
        "latitude": 6.84,
        "longitude": 158.33,
        "publicNarrative": "Basalt city on the reef."
    });
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/private/sites",
        Some(&token),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/public/sites/{id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Nan Madol");
}

#[tokio::test]
async fn invalid_artifact_type_maps_to_400() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let token = token_for("u1", "admin@aeon.org", &["Admin"]);

    let payload = json!({
        "name": "Odd find",
        "catalogNumber": "GOB-009",
        "dateDiscovered": "1994-10-01T00:00:00Z",
        "type": "Spaceship",
        "siteId": site.id
    });
    let (status, _) = send(
        &router,
        Method::POST,
        "/api/private/artifacts",
        Some(&token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_image_bytes_are_served_with_headers() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;

    let media = MediaService::new(&db)
        .upload(
            artifact.id,
            MediaUpload {
                file_name: "GOB-001-a.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                data: b"jpeg bytes".to_vec(),
            },
            true,
        )
        .await
        .unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/public/artifacts/images/{}", media.id))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=86400"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"jpeg bytes");

    // The artifact projection points at the same URL.
    let (_, body) = send(
        &router,
        Method::GET,
        &format!("/api/public/artifacts/{}", artifact.id),
        None,
        None,
    )
    .await;
    assert_eq!(
        body["primaryImageUrl"],
        format!("/api/public/artifacts/images/{}", media.id)
    );
}

#[tokio::test]
async fn verify_without_capability_maps_to_403() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, WorkflowConfig { allow_resubmission: false });
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();
    service.submit(record.id).await.unwrap();

    let token = token_for("u1", "researcher@aeon.org", &["Researcher"]);
    let (status, _) = send(
        &router,
        Method::POST,
        &format!("/api/private/catalog-records/{}/verify", record.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn illegal_transition_maps_to_409() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    // Still in Draft; verify must be refused.
    let service = CatalogService::new(&db, WorkflowConfig { allow_resubmission: false });
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    let token = token_for("u2", "archivist@aeon.org", &["Archivist"]);
    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/api/private/catalog-records/{}/verify", record.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Draft"));
}

#[tokio::test]
async fn catalog_record_workflow_over_http() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let researcher = token_for("u1", "researcher@aeon.org", &["Researcher"]);
    let archivist = token_for("u2", "archivist@aeon.org", &["Archivist"]);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/private/catalog-records",
        Some(&researcher),
        Some(json!({
            "artifactId": artifact.id,
            "notes": [{"content": "Initial survey"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Draft");
    assert_eq!(body["notes"][0]["content"], "Initial survey");
    let record_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/api/private/catalog-records/{record_id}/submit"),
        Some(&researcher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Submitted");

    let (status, body) = send(
        &router,
        Method::POST,
        &format!("/api/private/catalog-records/{record_id}/verify"),
        Some(&archivist),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Verified");
    assert_eq!(body["verifiedById"], "u2");
    assert!(!body["dateVerified"].is_null());

    // History shows up on the private artifact view.
    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/private/artifacts/{}", artifact.id),
        Some(&researcher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["catalogRecords"][0]["status"], "Verified");
}

#[tokio::test]
async fn upload_without_capability_maps_to_403() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;

    // Viewer may not upload.
    let token = token_for("u1", "viewer@aeon.org", &["Viewer"]);

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nbytes\r\n--{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/private/artifacts/{}/images", artifact.id))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn multipart_upload_stores_the_file() {
    let (router, db) = setup_router().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;

    let token = token_for("u1", "researcher@aeon.org", &["Researcher"]);

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nimage payload\r\n--{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!(
            "/api/private/artifacts/{}/images?isPrimary=true",
            artifact.id
        ))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["fileName"], "a.jpg");
    assert_eq!(value["isPrimary"], true);

    let media = MediaService::new(&db)
        .get(value["id"].as_i64().unwrap() as i32)
        .await
        .unwrap();
    assert_eq!(media.0, b"image payload");
}

//! Catalog record lifecycle tests against a migrated in-memory database.

mod common;

use registry::bootstrap::config::WorkflowConfig;
use registry::modules::access::CapabilitySet;
use registry::modules::catalog::{CatalogService, CatalogStatus, NoteDraft, ServiceError};

const NO_RESUBMISSION: WorkflowConfig = WorkflowConfig {
    allow_resubmission: false,
};

fn verifier_caps() -> CapabilitySet {
    CapabilitySet::from_claims(&["Archivist".to_string()], &[])
}

fn viewer_caps() -> CapabilitySet {
    CapabilitySet::from_claims(&["Viewer".to_string()], &[])
}

#[tokio::test]
async fn new_record_starts_in_draft_without_verifier() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, notes) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    assert_eq!(record.status, CatalogStatus::Draft.as_str());
    assert_eq!(record.submitted_by_id, "u1");
    assert!(record.verified_by_id.is_none());
    assert!(record.date_verified.is_none());
    assert!(notes.is_empty());
}

#[tokio::test]
async fn initial_notes_are_stored_with_the_record() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let drafts = vec![
        NoteDraft {
            author_id: "u1".to_string(),
            content: "First observation".to_string(),
        },
        NoteDraft {
            author_id: "u1".to_string(),
            content: "Second observation".to_string(),
        },
    ];
    let (record, _) = service.create(artifact.id, "u1", drafts).await.unwrap();

    let (_, notes) = service.get(record.id).await.unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].content, "First observation");
    assert_eq!(notes[1].content, "Second observation");
}

#[tokio::test]
async fn verify_before_submit_is_an_invalid_transition() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    let err = service
        .verify(record.id, "u2", &verifier_caps())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidTransition {
            from: CatalogStatus::Draft,
            to: CatalogStatus::Verified,
        }
    ));

    // The record is untouched.
    let (unchanged, _) = service.get(record.id).await.unwrap();
    assert_eq!(unchanged.status, CatalogStatus::Draft.as_str());
    assert!(unchanged.verified_by_id.is_none());
}

#[tokio::test]
async fn submit_then_verify_records_the_reviewer() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    let submitted = service.submit(record.id).await.unwrap();
    assert_eq!(submitted.status, CatalogStatus::Submitted.as_str());

    let verified = service
        .verify(record.id, "u2", &verifier_caps())
        .await
        .unwrap();
    assert_eq!(verified.status, CatalogStatus::Verified.as_str());
    assert_eq!(verified.verified_by_id.as_deref(), Some("u2"));
    assert!(verified.date_verified.is_some());
}

#[tokio::test]
async fn verified_record_cannot_be_reviewed_again() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();
    service.submit(record.id).await.unwrap();
    service
        .verify(record.id, "u2", &verifier_caps())
        .await
        .unwrap();

    let err = service
        .verify(record.id, "u2", &verifier_caps())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));

    let err = service
        .reject(record.id, "u2", &verifier_caps())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));
}

#[tokio::test]
async fn review_without_capability_is_forbidden() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();
    service.submit(record.id).await.unwrap();

    let err = service
        .verify(record.id, "u1", &viewer_caps())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    // Still Submitted.
    let (unchanged, _) = service.get(record.id).await.unwrap();
    assert_eq!(unchanged.status, CatalogStatus::Submitted.as_str());
}

#[tokio::test]
async fn rejected_record_is_terminal_by_default() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();
    service.submit(record.id).await.unwrap();
    service
        .reject(record.id, "u2", &verifier_caps())
        .await
        .unwrap();

    let err = service.submit(record.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));
}

#[tokio::test]
async fn rejected_record_may_resubmit_when_policy_allows() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let service = CatalogService::new(
        &db,
        WorkflowConfig {
            allow_resubmission: true,
        },
    );
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();
    service.submit(record.id).await.unwrap();
    service
        .reject(record.id, "u2", &verifier_caps())
        .await
        .unwrap();

    let resubmitted = service.submit(record.id).await.unwrap();
    assert_eq!(resubmitted.status, CatalogStatus::Submitted.as_str());
}

#[tokio::test]
async fn notes_may_be_added_in_any_state() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;
    common::create_user(&db, "u2", "archivist@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    service
        .add_note(record.id, "u1", "Draft note".to_string())
        .await
        .unwrap();
    service.submit(record.id).await.unwrap();
    service
        .verify(record.id, "u2", &verifier_caps())
        .await
        .unwrap();
    service
        .add_note(record.id, "u2", "Post-verification note".to_string())
        .await
        .unwrap();

    let (rec, notes) = service.get(record.id).await.unwrap();
    assert_eq!(rec.status, CatalogStatus::Verified.as_str());
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[1].content, "Post-verification note");
}

#[tokio::test]
async fn blank_note_content_is_rejected() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    let err = service
        .add_note(record.id, "u1", "   ".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn note_length_limit_counts_characters_not_bytes() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let (record, _) = service.create(artifact.id, "u1", vec![]).await.unwrap();

    // 1500 characters of a two-byte codepoint: over 2000 bytes, under the
    // 2000-character limit.
    let multibyte = "ü".repeat(1500);
    service.add_note(record.id, "u1", multibyte).await.unwrap();

    let err = service
        .add_note(record.id, "u1", "a".repeat(2001))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn create_fails_for_unknown_artifact_or_user() {
    let db = common::setup_db().await;
    let site = common::create_site(&db, "Gobekli Tepe").await;
    let artifact = common::create_artifact(&db, site.id, "GOB-001").await;
    common::create_user(&db, "u1", "researcher@aeon.org").await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);

    let err = service.create(9999, "u1", vec![]).await.unwrap_err();
    assert!(matches!(err, ServiceError::ArtifactNotFound(9999)));

    let err = service.create(artifact.id, "ghost", vec![]).await.unwrap_err();
    assert!(matches!(err, ServiceError::UserNotFound(_)));
}

#[tokio::test]
async fn submit_unknown_record_is_not_found() {
    let db = common::setup_db().await;

    let service = CatalogService::new(&db, NO_RESUBMISSION);
    let err = service.submit(42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(42)));
}

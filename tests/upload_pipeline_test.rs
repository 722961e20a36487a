mod helpers;

use std::sync::Arc;

use helpers::{
    incoming, permissive_policy, upload_service, FailingFileRecordRepository,
    InMemoryFileRecordRepository, StubOutcome, StubScanner,
};

use filegate::{
    application::{
        error::{ApplicationError, ValidationError},
        services::ScannerService,
    },
    domain::config::UploadPolicy,
    services::{CompositeScanner, MemoryStorageService},
};

#[tokio::test]
async fn oversized_upload_aborts_before_scan_and_storage() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Clean));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let policy = UploadPolicy {
        max_size_bytes: 1024 * 1024,
        ..permissive_policy()
    };
    let service = upload_service(
        policy,
        scanner.clone(),
        storage.clone(),
        records.clone(),
        false,
    );

    let file = incoming(
        "big.bin",
        "application/octet-stream",
        &vec![0u8; 2 * 1024 * 1024],
    )
    .await;
    let err = service.upload(file).await.unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Validation(ValidationError::TooLarge)
    ));
    assert_eq!(scanner.call_count(), 0);
    assert!(storage.is_empty());
    assert_eq!(records.record_count(), 0);
}

#[tokio::test]
async fn disallowed_extension_aborts_before_scan() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Clean));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let policy = UploadPolicy {
        allowed_extensions: vec![".pdf".to_string()],
        ..permissive_policy()
    };
    let service = upload_service(
        policy,
        scanner.clone(),
        storage.clone(),
        records.clone(),
        false,
    );

    let err = service
        .upload(incoming("report.exe", "application/pdf", b"MZ").await)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Validation(ValidationError::ExtensionNotAllowed)
    ));
    assert_eq!(scanner.call_count(), 0);
    assert!(storage.is_empty());
    assert_eq!(records.record_count(), 0);
}

#[tokio::test]
async fn infected_upload_persists_nothing() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Infected("eicar".to_string())));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let service = upload_service(
        permissive_policy(),
        scanner.clone(),
        storage.clone(),
        records.clone(),
        false,
    );

    let err = service
        .upload(incoming("sample.bin", "application/octet-stream", b"payload").await)
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Unsafe(_)));
    assert_eq!(scanner.call_count(), 1);
    assert!(storage.is_empty());
    assert_eq!(records.record_count(), 0);
}

#[tokio::test]
async fn scanner_outage_rejects_by_default() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Unavailable("down".to_string())));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let service = upload_service(
        permissive_policy(),
        scanner,
        storage.clone(),
        records.clone(),
        false,
    );

    let err = service
        .upload(incoming("doc.txt", "text/plain", b"hello").await)
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ScannerUnavailable(_)));
    assert!(storage.is_empty());
    assert_eq!(records.record_count(), 0);
}

#[tokio::test]
async fn scanner_outage_admits_unverified_when_fail_open() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Unavailable("down".to_string())));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let service = upload_service(
        permissive_policy(),
        scanner,
        storage.clone(),
        records.clone(),
        true,
    );

    let record = service
        .upload(incoming("doc.txt", "text/plain", b"hello").await)
        .await
        .unwrap();

    // Admitted without a verdict, so the record must not claim safety.
    assert!(!record.is_safe);
    assert!(storage.contains(&record.stored_name));
    assert_eq!(records.record_count(), 1);
}

#[tokio::test]
async fn fail_open_cannot_admit_content_flagged_by_another_scanner() {
    let scanner: Arc<dyn ScannerService> = Arc::new(CompositeScanner::new(vec![
        Arc::new(StubScanner::new(StubOutcome::Unavailable("vt down".to_string()))),
        Arc::new(StubScanner::new(StubOutcome::Infected("eicar".to_string()))),
    ]));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let service = upload_service(
        permissive_policy(),
        scanner,
        storage.clone(),
        records.clone(),
        true,
    );

    let err = service
        .upload(incoming("sample.bin", "application/octet-stream", b"payload").await)
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Unsafe(_)));
    assert!(storage.is_empty());
    assert_eq!(records.record_count(), 0);
}

#[tokio::test]
async fn successful_upload_creates_record_and_blob() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Clean));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let policy = UploadPolicy {
        allowed_extensions: vec![".pdf".to_string()],
        ..permissive_policy()
    };
    let service = upload_service(policy, scanner, storage.clone(), records.clone(), false);

    let content = vec![0x25u8; 50 * 1024]; // 50 KB
    let record = service
        .upload(incoming("report.pdf", "Application/PDF", &content).await)
        .await
        .unwrap();

    assert_eq!(record.stored_name, format!("{}.pdf", record.id));
    assert_eq!(record.content_type, "application/pdf");
    assert_eq!(record.size_bytes, content.len() as u64);
    assert!(record.is_safe);
    assert_eq!(record.access_token.len(), 32);
    assert!(record.access_token.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(storage.contains(&record.stored_name));
    assert_eq!(records.record_count(), 1);
}

#[tokio::test]
async fn repeated_uploads_get_distinct_tokens_and_names() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Clean));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(InMemoryFileRecordRepository::new());

    let service = upload_service(
        permissive_policy(),
        scanner,
        storage.clone(),
        records.clone(),
        false,
    );

    let first = service
        .upload(incoming("same.txt", "text/plain", b"identical bytes").await)
        .await
        .unwrap();
    let second = service
        .upload(incoming("same.txt", "text/plain", b"identical bytes").await)
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(first.stored_name, second.stored_name);
    assert_ne!(first.access_token, second.access_token);
    assert_eq!(storage.object_count(), 2);
}

#[tokio::test]
async fn persistence_failure_cleans_up_the_blob() {
    let scanner = Arc::new(StubScanner::new(StubOutcome::Clean));
    let storage = Arc::new(MemoryStorageService::new());
    let records = Arc::new(FailingFileRecordRepository);

    let service = upload_service(
        permissive_policy(),
        scanner,
        storage.clone(),
        records,
        false,
    );

    let err = service
        .upload(incoming("doc.txt", "text/plain", b"hello").await)
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::DatabaseError(_)));
    assert!(storage.is_empty());
}

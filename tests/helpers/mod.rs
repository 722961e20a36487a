use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use futures::StreamExt;
use uuid::Uuid;

use filegate::{
    application::{
        dto::file_record_dto::FileRecordDTO,
        error::ApplicationError,
        repositories::FileRecordRepository,
        services::{
            ContentStream, DownloadService, ScanError, ScannerService, StorageService,
            TokenService, UploadService, Verdict,
        },
    },
    domain::{
        config::UploadPolicy,
        models::{file_record::FileRecord, spool::FileSpool, upload::IncomingFile},
    },
    services::MemoryStorageService,
};

pub struct InMemoryFileRecordRepository {
    records: Mutex<Vec<FileRecord>>,
}

impl InMemoryFileRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl FileRecordRepository for InMemoryFileRecordRepository {
    async fn create(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        let record: FileRecord = record.into();
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, ApplicationError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(records)
    }
}

/// Repository whose writes always fail, for exercising the persistence
/// failure path after storage has succeeded.
pub struct FailingFileRecordRepository;

#[async_trait]
impl FileRecordRepository for FailingFileRecordRepository {
    async fn create(&self, _record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        Err(ApplicationError::DatabaseError(
            "simulated outage".to_string(),
        ))
    }

    async fn get_by_id(&self, _id: Uuid) -> Result<Option<FileRecord>, ApplicationError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        Ok(Vec::new())
    }
}

#[derive(Clone)]
pub enum StubOutcome {
    Clean,
    Infected(String),
    Unavailable(String),
}

/// Scanner with a fixed outcome and an invocation counter.
pub struct StubScanner {
    outcome: StubOutcome,
    pub calls: Arc<AtomicUsize>,
}

impl StubScanner {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScannerService for StubScanner {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn scan(&self, _file_name: &str, _content: &FileSpool) -> Result<Verdict, ScanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            StubOutcome::Clean => Ok(Verdict::Clean),
            StubOutcome::Infected(reason) => Ok(Verdict::Infected(reason.clone())),
            StubOutcome::Unavailable(msg) => Err(ScanError::Unavailable(msg.clone())),
        }
    }
}

pub fn permissive_policy() -> UploadPolicy {
    UploadPolicy {
        max_size_bytes: 500 * 1024 * 1024,
        allowed_extensions: vec![],
        allowed_mime_types: vec![],
    }
}

pub async fn incoming(name: &str, mime: &str, content: &[u8]) -> IncomingFile {
    let spool = FileSpool::from_bytes(content).await.expect("spool write");
    IncomingFile::new(spool, name.to_string(), mime.to_string())
}

pub fn upload_service(
    policy: UploadPolicy,
    scanner: Arc<dyn ScannerService>,
    storage: Arc<MemoryStorageService>,
    records: Arc<dyn FileRecordRepository>,
    fail_open: bool,
) -> UploadService {
    UploadService::new(
        policy,
        scanner,
        storage as Arc<dyn StorageService>,
        records,
        TokenService::new(),
        fail_open,
    )
}

pub fn download_service(
    records: Arc<dyn FileRecordRepository>,
    storage: Arc<MemoryStorageService>,
) -> DownloadService {
    DownloadService::new(records, storage as Arc<dyn StorageService>, TokenService::new())
}

pub async fn collect(mut stream: ContentStream) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(chunk) = stream.next().await {
        out.extend_from_slice(&chunk.expect("stream chunk"));
    }
    out
}

//! In-memory test doubles mirroring the adapter contracts.
//!
//! The repository double applies the same predicate semantics the SQL
//! adapter encodes (AND conjunction, case-sensitive contains, inclusive
//! bounds, descending client time with stable ties) so the full HTTP flow
//! can be exercised without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageRequest;
use uuid::Uuid;

use guardpost_backend::domain::ports::{
    CameraSnapshot, CameraSnapshotError, CameraSnapshotSource, ImageStore, ImageStoreError,
    PatrolRecordRepository, PatrolRecordRepositoryError, RecordPage, RecordPredicate, StoredImage,
    TextField, TimeField,
};
use guardpost_backend::domain::{ImageId, NewPatrolRecord, PatrolRecord, PatrolRecordParts};

/// Repository double holding records in insertion order.
#[derive(Default)]
pub struct InMemoryPatrolRecordRepository {
    records: Mutex<Vec<PatrolRecord>>,
}

fn text_field<'a>(record: &'a PatrolRecord, field: TextField) -> &'a str {
    match field {
        TextField::Checkpoint => record.checkpoint(),
        TextField::GuardName => record.guard_name(),
        TextField::Note => record.note(),
        TextField::ImageId => record.image_id().as_str(),
    }
}

fn time_field(record: &PatrolRecord, field: TimeField) -> i64 {
    match field {
        TimeField::ClientTime => record.client_time(),
        TimeField::ServerTime => record.server_time(),
    }
}

fn matches(record: &PatrolRecord, predicate: &RecordPredicate) -> bool {
    match predicate {
        RecordPredicate::Equals(field, value) => text_field(record, *field) == value,
        RecordPredicate::Contains(field, value) => text_field(record, *field).contains(value),
        RecordPredicate::GreaterOrEqual(field, bound) => time_field(record, *field) >= *bound,
        RecordPredicate::LessOrEqual(field, bound) => time_field(record, *field) <= *bound,
        RecordPredicate::NotEquals(field, value) => text_field(record, *field) != value,
    }
}

impl InMemoryPatrolRecordRepository {
    fn filtered(&self, predicates: &[RecordPredicate]) -> Vec<PatrolRecord> {
        let records = self.records.lock().expect("repository lock");
        // Stable sort keeps insertion order within equal client times.
        let mut matching: Vec<PatrolRecord> = records
            .iter()
            .filter(|record| predicates.iter().all(|p| matches(record, p)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.client_time().cmp(&a.client_time()));
        matching
    }
}

#[async_trait]
impl PatrolRecordRepository for InMemoryPatrolRecordRepository {
    async fn insert(
        &self,
        record: &NewPatrolRecord,
    ) -> Result<PatrolRecord, PatrolRecordRepositoryError> {
        let mut records = self.records.lock().expect("repository lock");
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(PatrolRecordRepositoryError::duplicate(record.id()));
        }
        let now = Utc::now();
        let stored = PatrolRecord::new(PatrolRecordParts {
            id: record.id(),
            checkpoint: record.checkpoint().to_owned(),
            guard_name: record.guard_name().to_owned(),
            client_time: record.client_time(),
            server_time: record.server_time(),
            image_id: record.image_id().clone(),
            note: record.note().to_owned(),
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| PatrolRecordRepositoryError::query(err.to_string()))?;
        records.push(stored.clone());
        Ok(stored)
    }

    async fn query_paged(
        &self,
        predicates: &[RecordPredicate],
        page: PageRequest,
    ) -> Result<RecordPage, PatrolRecordRepositoryError> {
        let matching = self.filtered(predicates);
        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).expect("offset fits usize");
        let limit = usize::try_from(page.limit()).expect("limit fits usize");
        let records = matching.into_iter().skip(offset).take(limit).collect();
        Ok(RecordPage { records, total })
    }

    async fn query_all(
        &self,
        predicates: &[RecordPredicate],
    ) -> Result<Vec<PatrolRecord>, PatrolRecordRepositoryError> {
        Ok(self.filtered(predicates))
    }

    async fn get_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PatrolRecord>, PatrolRecordRepositoryError> {
        let records = self.records.lock().expect("repository lock");
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }
}

/// Image store double keyed by image id, extension-less.
#[derive(Default)]
pub struct InMemoryImageStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn save(
        &self,
        image_id: &ImageId,
        bytes: &[u8],
    ) -> Result<StoredImage, ImageStoreError> {
        let mut blobs = self.blobs.lock().expect("store lock");
        blobs.insert(image_id.as_str().to_owned(), bytes.to_vec());
        Ok(StoredImage {
            path: format!("{image_id}.jpg").into(),
        })
    }

    async fn get(&self, image_id: &ImageId) -> Result<Option<Vec<u8>>, ImageStoreError> {
        let blobs = self.blobs.lock().expect("store lock");
        Ok(blobs.get(image_id.as_str()).cloned())
    }

    async fn delete(&self, image_id: &ImageId) -> Result<bool, ImageStoreError> {
        let mut blobs = self.blobs.lock().expect("store lock");
        Ok(blobs.remove(image_id.as_str()).is_some())
    }
}

/// Camera double serving fixed bytes, or refusing every fetch.
pub struct StubCameraSource {
    response: Option<Vec<u8>>,
}

impl StubCameraSource {
    /// A camera that answers every fetch with the given bytes.
    pub fn serving(bytes: Vec<u8>) -> Self {
        Self {
            response: Some(bytes),
        }
    }

    /// A camera that is unreachable.
    pub fn unreachable() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl CameraSnapshotSource for StubCameraSource {
    async fn fetch(&self, _endpoint: &url::Url) -> Result<CameraSnapshot, CameraSnapshotError> {
        match &self.response {
            Some(bytes) => Ok(CameraSnapshot {
                bytes: bytes.clone(),
                content_type: Some("image/jpeg".to_owned()),
            }),
            None => Err(CameraSnapshotError::transport("connection refused")),
        }
    }
}

//! Patrol ingestion and query orchestration.
//!
//! Implements the driving ports for record creation, record queries, and
//! image retrieval by composing the record repository with the image
//! service. Filter translation from high-level input to typed predicates
//! lives here so adapters never build predicates themselves.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageEnvelope;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::image_service::ImageService;
use crate::domain::ports::{
    ListRecordsRequest, PatrolImageQuery, PatrolRecordRepository, PatrolRecordRepositoryError,
    PatrolRecordsCommand, PatrolRecordsQuery, RecordFilter, RecordPredicate, TextField, TimeField,
};
use crate::domain::{Error, ImageId, NewPatrolRecord, PatrolRecord};

fn map_repository_error(error: PatrolRecordRepositoryError) -> Error {
    match error {
        PatrolRecordRepositoryError::Duplicate { id } => {
            Error::conflict(format!("patrol record {id} already exists"))
        }
        PatrolRecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patrol record store unavailable: {message}"))
        }
        PatrolRecordRepositoryError::Query { message } => {
            Error::internal(format!("patrol record store error: {message}"))
        }
    }
}

/// Translate high-level filters into the repository predicate set.
///
/// Absent fields contribute no predicate; `has_notes: Some(false)` is
/// equivalent to absent.
fn predicates_for(filter: &RecordFilter) -> Vec<RecordPredicate> {
    let mut predicates = Vec::new();
    if let Some(checkpoint) = &filter.checkpoint {
        predicates.push(RecordPredicate::Equals(
            TextField::Checkpoint,
            checkpoint.clone(),
        ));
    }
    if let Some(guard_name) = &filter.guard_name {
        predicates.push(RecordPredicate::Contains(
            TextField::GuardName,
            guard_name.clone(),
        ));
    }
    if let Some(start) = filter.start_time {
        predicates.push(RecordPredicate::GreaterOrEqual(TimeField::ClientTime, start));
    }
    if let Some(end) = filter.end_time {
        predicates.push(RecordPredicate::LessOrEqual(TimeField::ClientTime, end));
    }
    if filter.has_notes == Some(true) {
        predicates.push(RecordPredicate::NotEquals(TextField::Note, String::new()));
    }
    predicates
}

/// Orchestrator for the create, list, and image use cases.
#[derive(Clone)]
pub struct PatrolService {
    records: Arc<dyn PatrolRecordRepository>,
    images: Arc<ImageService>,
}

impl PatrolService {
    /// Create the orchestrator from its collaborators.
    pub fn new(records: Arc<dyn PatrolRecordRepository>, images: Arc<ImageService>) -> Self {
        Self { records, images }
    }
}

#[async_trait]
impl PatrolRecordsCommand for PatrolService {
    async fn create_record(&self, record: NewPatrolRecord) -> Result<PatrolRecord, Error> {
        let records = Arc::clone(&self.records);
        let images = Arc::clone(&self.images);

        // The pipeline runs on a detached task: a client disconnect must not
        // cancel the camera fetch mid-flight (it stays bounded by its own
        // timeout) nor the insert once issued.
        let pipeline = tokio::spawn(async move {
            let record_id = record.id();
            let capture = images
                .fetch_and_save_for_checkpoint(record.image_id(), record.checkpoint())
                .await;
            match capture {
                Some(path) => info!(
                    record_id = %record_id,
                    checkpoint = record.checkpoint(),
                    path = %path.display(),
                    "camera image saved for patrol record"
                ),
                None => debug!(
                    record_id = %record_id,
                    checkpoint = record.checkpoint(),
                    "no camera image for patrol record, continuing without one"
                ),
            }

            records.insert(&record).await
        });

        pipeline
            .await
            .map_err(|err| Error::internal(format!("record creation task failed: {err}")))?
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl PatrolRecordsQuery for PatrolService {
    async fn list_records(
        &self,
        request: ListRecordsRequest,
    ) -> Result<PageEnvelope<PatrolRecord>, Error> {
        let predicates = predicates_for(&request.filter);
        let page = self
            .records
            .query_paged(&predicates, request.page)
            .await
            .map_err(map_repository_error)?;
        Ok(PageEnvelope::new(page.records, page.total, request.page))
    }

    async fn get_record(&self, id: Uuid) -> Result<PatrolRecord, Error> {
        self.records
            .get_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("patrol record {id} not found")))
    }
}

#[async_trait]
impl PatrolImageQuery for PatrolService {
    async fn get_image(&self, image_id: &ImageId) -> Result<Option<Vec<u8>>, Error> {
        self.images.get_image(image_id).await
    }
}

#[cfg(test)]
#[path = "patrol_service_tests.rs"]
mod tests;

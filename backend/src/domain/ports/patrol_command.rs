//! Driving port for patrol record ingestion.

use async_trait::async_trait;

use crate::domain::{Error, NewPatrolRecord, PatrolRecord};

/// Port for the create-record use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatrolRecordsCommand: Send + Sync {
    /// Ingest a scan event: best-effort photo capture, then durable insert.
    ///
    /// # Errors
    ///
    /// Returns a conflict error for a duplicate id and a server error when
    /// persistence fails. Camera failures never surface here.
    async fn create_record(&self, record: NewPatrolRecord) -> Result<PatrolRecord, Error>;
}

/// Fixture implementation for tests that do not exercise ingestion.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatrolRecordsCommand;

#[async_trait]
impl PatrolRecordsCommand for FixturePatrolRecordsCommand {
    async fn create_record(&self, record: NewPatrolRecord) -> Result<PatrolRecord, Error> {
        use chrono::Utc;

        use crate::domain::PatrolRecordParts;

        let now = Utc::now();
        PatrolRecord::new(PatrolRecordParts {
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
        .map_err(|err| Error::internal(err.to_string()))
    }
}

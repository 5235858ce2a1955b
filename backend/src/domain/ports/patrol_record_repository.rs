//! Port for durable patrol record persistence and querying.
//!
//! Filters are a closed set of typed predicates over typed fields, combined
//! as a logical AND and applied by adapters through an explicit match —
//! never by string-keyed attribute dispatch.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::{NewPatrolRecord, PatrolRecord};

/// Text-valued record fields usable in filter predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// The checkpoint identifier.
    Checkpoint,
    /// The reporting guard's name.
    GuardName,
    /// The free-text note.
    Note,
    /// The image correlation identifier.
    ImageId,
}

/// Time-valued record fields usable in filter predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    /// The device-recorded scan timestamp.
    ClientTime,
    /// The ingestion-recorded timestamp.
    ServerTime,
}

/// One filter predicate; a query carries a conjunction of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPredicate {
    /// Exact match on a text field.
    Equals(TextField, String),
    /// Case-sensitive substring match on a text field.
    Contains(TextField, String),
    /// Inclusive lower bound on a time field.
    GreaterOrEqual(TimeField, i64),
    /// Inclusive upper bound on a time field.
    LessOrEqual(TimeField, i64),
    /// Exclusion match on a text field.
    NotEquals(TextField, String),
}

/// One page of records plus the total match count across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPage {
    /// The page slice, most recent `client_time` first.
    pub records: Vec<PatrolRecord>,
    /// Total records matching the predicates, independent of pagination.
    pub total: u64,
}

/// Errors raised by patrol record repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatrolRecordRepositoryError {
    /// A record with the same id already exists.
    #[error("patrol record {id} already exists")]
    Duplicate {
        /// The colliding record identifier.
        id: Uuid,
    },
    /// Repository connection could not be established.
    #[error("patrol record repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("patrol record repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl PatrolRecordRepositoryError {
    /// A duplicate-key failure for the given record id.
    pub fn duplicate(id: Uuid) -> Self {
        Self::Duplicate { id }
    }

    /// A connection failure with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// A query failure with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for inserting and querying stored patrol records.
///
/// Query operations order by `client_time` descending with a stable
/// tie-break, so page slices are deterministic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatrolRecordRepository: Send + Sync {
    /// Persist a new record and return the stored row with audit timestamps.
    async fn insert(
        &self,
        record: &NewPatrolRecord,
    ) -> Result<PatrolRecord, PatrolRecordRepositoryError>;

    /// Return the requested page slice and the total match count.
    ///
    /// Predicates combine as a logical AND; a page past the end yields an
    /// empty slice with the correct total.
    async fn query_paged(
        &self,
        predicates: &[RecordPredicate],
        page: PageRequest,
    ) -> Result<RecordPage, PatrolRecordRepositoryError>;

    /// Return every matching record, unpaged, for aggregation.
    async fn query_all(
        &self,
        predicates: &[RecordPredicate],
    ) -> Result<Vec<PatrolRecord>, PatrolRecordRepositoryError>;

    /// Find a record by id.
    async fn get_by_id(&self, id: Uuid)
    -> Result<Option<PatrolRecord>, PatrolRecordRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatrolRecordRepository;

#[async_trait]
impl PatrolRecordRepository for FixturePatrolRecordRepository {
    async fn insert(
        &self,
        record: &NewPatrolRecord,
    ) -> Result<PatrolRecord, PatrolRecordRepositoryError> {
        use chrono::Utc;

        use crate::domain::PatrolRecordParts;

        let now = Utc::now();
        crate::domain::PatrolRecord::new(PatrolRecordParts {
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
        .map_err(|err| PatrolRecordRepositoryError::query(err.to_string()))
    }

    async fn query_paged(
        &self,
        _predicates: &[RecordPredicate],
        _page: PageRequest,
    ) -> Result<RecordPage, PatrolRecordRepositoryError> {
        Ok(RecordPage {
            records: Vec::new(),
            total: 0,
        })
    }

    async fn query_all(
        &self,
        _predicates: &[RecordPredicate],
    ) -> Result<Vec<PatrolRecord>, PatrolRecordRepositoryError> {
        Ok(Vec::new())
    }

    async fn get_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<PatrolRecord>, PatrolRecordRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Fixture behaviour and error constructor coverage.

    use rstest::rstest;

    use super::*;
    use crate::domain::{ImageId, NewPatrolRecordDraft};

    fn record() -> NewPatrolRecord {
        NewPatrolRecord::new(NewPatrolRecordDraft {
            id: Uuid::new_v4(),
            checkpoint: "3".to_owned(),
            guard_name: "Janssen".to_owned(),
            client_time: 1_700_000_000,
            server_time: 1_700_000_003,
            image_id: ImageId::new("img-3").expect("valid image id"),
            note: String::new(),
        })
        .expect("valid record")
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_echoes_the_record() {
        let stored = FixturePatrolRecordRepository
            .insert(&record())
            .await
            .expect("fixture insert succeeds");
        assert_eq!(stored.checkpoint(), "3");
        assert_eq!(stored.guard_name(), "Janssen");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_queries_return_empty() {
        let repo = FixturePatrolRecordRepository;
        let page = repo
            .query_paged(&[], PageRequest::default())
            .await
            .expect("fixture query succeeds");
        assert!(page.records.is_empty());
        assert_eq!(page.total, 0);
        assert!(repo.get_by_id(Uuid::new_v4()).await.expect("ok").is_none());
    }

    #[rstest]
    fn duplicate_error_names_the_id() {
        let id = Uuid::new_v4();
        let message = PatrolRecordRepositoryError::duplicate(id).to_string();
        assert!(message.contains(&id.to_string()));
    }
}

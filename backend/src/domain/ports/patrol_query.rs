//! Driving port for patrol record queries.

use async_trait::async_trait;
use pagination::{PageEnvelope, PageRequest};
use uuid::Uuid;

use crate::domain::{Error, PatrolRecord};

/// High-level list filters; an absent field contributes no predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact checkpoint match.
    pub checkpoint: Option<String>,
    /// Case-sensitive guard-name substring match.
    pub guard_name: Option<String>,
    /// Inclusive lower bound on the device-recorded timestamp.
    pub start_time: Option<i64>,
    /// Inclusive upper bound on the device-recorded timestamp.
    pub end_time: Option<i64>,
    /// `true` restricts to records with a non-empty note; `false` and
    /// absent are equivalent and add nothing.
    pub has_notes: Option<bool>,
}

/// A filtered, paginated list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRecordsRequest {
    /// Filters to combine as a logical AND.
    pub filter: RecordFilter,
    /// Validated page parameters.
    pub page: PageRequest,
}

/// Port for the list and by-id read use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatrolRecordsQuery: Send + Sync {
    /// Return a page envelope of matching records, most recent scan first.
    async fn list_records(
        &self,
        request: ListRecordsRequest,
    ) -> Result<PageEnvelope<PatrolRecord>, Error>;

    /// Return the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no such record exists.
    async fn get_record(&self, id: Uuid) -> Result<PatrolRecord, Error>;
}

/// Fixture implementation for tests that do not exercise queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatrolRecordsQuery;

#[async_trait]
impl PatrolRecordsQuery for FixturePatrolRecordsQuery {
    async fn list_records(
        &self,
        request: ListRecordsRequest,
    ) -> Result<PageEnvelope<PatrolRecord>, Error> {
        Ok(PageEnvelope::new(Vec::new(), 0, request.page))
    }

    async fn get_record(&self, id: Uuid) -> Result<PatrolRecord, Error> {
        Err(Error::not_found(format!("patrol record {id} not found")))
    }
}

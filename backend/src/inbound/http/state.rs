//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixturePatrolImageQuery, FixturePatrolRecordsCommand, FixturePatrolRecordsQuery,
    FixturePatrolReportsQuery, PatrolImageQuery, PatrolRecordsCommand, PatrolRecordsQuery,
    PatrolReportsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Create-record use case.
    pub records_command: Arc<dyn PatrolRecordsCommand>,
    /// List and by-id read use cases.
    pub records_query: Arc<dyn PatrolRecordsQuery>,
    /// Image retrieval use case.
    pub images: Arc<dyn PatrolImageQuery>,
    /// Report aggregation use case.
    pub reports: Arc<dyn PatrolReportsQuery>,
}

impl HttpState {
    /// Construct state from the full set of port implementations.
    pub fn new(
        records_command: Arc<dyn PatrolRecordsCommand>,
        records_query: Arc<dyn PatrolRecordsQuery>,
        images: Arc<dyn PatrolImageQuery>,
        reports: Arc<dyn PatrolReportsQuery>,
    ) -> Self {
        Self {
            records_command,
            records_query,
            images,
            reports,
        }
    }

    /// State backed entirely by fixtures, for tests that exercise routing
    /// and marshalling only.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixturePatrolRecordsCommand),
            Arc::new(FixturePatrolRecordsQuery),
            Arc::new(FixturePatrolImageQuery),
            Arc::new(FixturePatrolReportsQuery),
        )
    }
}

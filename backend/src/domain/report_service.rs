//! Patrol activity aggregation service.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    CheckpointActivity, GuardActivity, PatrolRecordRepository, PatrolRecordRepositoryError,
    PatrolReportsQuery, PatrolSummary, RecordPredicate, TimeField, TimeRange,
};

fn map_repository_error(error: PatrolRecordRepositoryError) -> Error {
    match error {
        PatrolRecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("patrol record store unavailable: {message}"))
        }
        PatrolRecordRepositoryError::Query { message } => {
            Error::internal(format!("patrol record store error: {message}"))
        }
        PatrolRecordRepositoryError::Duplicate { id } => {
            Error::internal(format!("unexpected duplicate for {id} on a read path"))
        }
    }
}

/// Share of `count` in `total`, in percent rounded to one decimal place.
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

/// Aggregates scan activity over a time range.
#[derive(Clone)]
pub struct ReportService {
    records: Arc<dyn PatrolRecordRepository>,
}

impl ReportService {
    /// Create the service over the record repository.
    pub fn new(records: Arc<dyn PatrolRecordRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl PatrolReportsQuery for ReportService {
    async fn summary(&self, range: TimeRange) -> Result<PatrolSummary, Error> {
        let mut predicates = Vec::new();
        if let Some(start) = range.start_time {
            predicates.push(RecordPredicate::GreaterOrEqual(TimeField::ClientTime, start));
        }
        if let Some(end) = range.end_time {
            predicates.push(RecordPredicate::LessOrEqual(TimeField::ClientTime, end));
        }

        let records = self
            .records
            .query_all(&predicates)
            .await
            .map_err(map_repository_error)?;
        let total = records.len() as u64;

        // BTreeMap keeps checkpoints sorted by identifier for the response.
        let mut checkpoint_counts: BTreeMap<&str, u64> = BTreeMap::new();
        let mut guard_counts: BTreeMap<&str, u64> = BTreeMap::new();
        for record in &records {
            *checkpoint_counts.entry(record.checkpoint()).or_default() += 1;
            *guard_counts.entry(record.guard_name()).or_default() += 1;
        }

        let checkpoints = checkpoint_counts
            .iter()
            .map(|(&checkpoint, &count)| CheckpointActivity {
                checkpoint: checkpoint.to_owned(),
                count,
                percentage: percentage(count, total),
            })
            .collect();

        let mut guards: Vec<GuardActivity> = guard_counts
            .iter()
            .map(|(&guard_name, &count)| GuardActivity {
                guard_name: guard_name.to_owned(),
                count,
                percentage: percentage(count, total),
            })
            .collect();
        guards.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.guard_name.cmp(&b.guard_name)));

        Ok(PatrolSummary {
            total_scans: total,
            unique_checkpoints: checkpoint_counts.len() as u64,
            unique_guards: guard_counts.len() as u64,
            checkpoints,
            guards,
        })
    }
}

//! Driving port for patrol report aggregation.

use async_trait::async_trait;

use crate::domain::Error;

/// Optional inclusive bounds on the device-recorded timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound.
    pub start_time: Option<i64>,
    /// Inclusive upper bound.
    pub end_time: Option<i64>,
}

/// Scan count and share for one checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointActivity {
    /// The checkpoint identifier.
    pub checkpoint: String,
    /// Number of scans recorded at this checkpoint.
    pub count: u64,
    /// Share of all scans in the range, in percent rounded to one decimal.
    pub percentage: f64,
}

/// Scan count and share for one guard.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardActivity {
    /// The guard's name.
    pub guard_name: String,
    /// Number of scans this guard reported.
    pub count: u64,
    /// Share of all scans in the range, in percent rounded to one decimal.
    pub percentage: f64,
}

/// Aggregate patrol activity over a time range.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolSummary {
    /// Total scans in the range.
    pub total_scans: u64,
    /// Number of distinct checkpoints scanned.
    pub unique_checkpoints: u64,
    /// Number of distinct guards reporting.
    pub unique_guards: u64,
    /// Per-checkpoint activity, sorted by checkpoint identifier.
    pub checkpoints: Vec<CheckpointActivity>,
    /// Per-guard activity, sorted by count descending.
    pub guards: Vec<GuardActivity>,
}

/// Port for the report-summary use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatrolReportsQuery: Send + Sync {
    /// Aggregate scan activity over the given time range.
    async fn summary(&self, range: TimeRange) -> Result<PatrolSummary, Error>;
}

/// Fixture implementation reporting no activity.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatrolReportsQuery;

#[async_trait]
impl PatrolReportsQuery for FixturePatrolReportsQuery {
    async fn summary(&self, _range: TimeRange) -> Result<PatrolSummary, Error> {
        Ok(PatrolSummary {
            total_scans: 0,
            unique_checkpoints: 0,
            unique_guards: 0,
            checkpoints: Vec::new(),
            guards: Vec::new(),
        })
    }
}

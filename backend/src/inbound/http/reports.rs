//! Patrol report HTTP handlers.
//!
//! ```text
//! GET /api/v1/reports/summary
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CheckpointActivity, GuardActivity, PatrolSummary, TimeRange};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query parameters accepted by the summary endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SummaryParams {
    /// Inclusive lower bound on the device-recorded timestamp.
    pub start_time: Option<i64>,
    /// Inclusive upper bound on the device-recorded timestamp.
    pub end_time: Option<i64>,
}

/// Scan count and share for one checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointActivityBody {
    /// Checkpoint identifier.
    pub checkpoint: String,
    /// Number of scans at this checkpoint.
    pub count: u64,
    /// Share of all scans, in percent.
    pub percentage: f64,
}

/// Scan count and share for one guard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuardActivityBody {
    /// Guard's name.
    pub guard_name: String,
    /// Number of scans this guard reported.
    pub count: u64,
    /// Share of all scans, in percent.
    pub percentage: f64,
}

/// Aggregate patrol activity over the requested range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatrolSummaryBody {
    /// Total scans in the range.
    pub total_scans: u64,
    /// Number of distinct checkpoints scanned.
    pub unique_checkpoints: u64,
    /// Number of distinct guards reporting.
    pub unique_guards: u64,
    /// Per-checkpoint activity, sorted by checkpoint identifier.
    pub checkpoints: Vec<CheckpointActivityBody>,
    /// Per-guard activity, busiest guard first.
    pub guards: Vec<GuardActivityBody>,
}

impl From<CheckpointActivity> for CheckpointActivityBody {
    fn from(activity: CheckpointActivity) -> Self {
        Self {
            checkpoint: activity.checkpoint,
            count: activity.count,
            percentage: activity.percentage,
        }
    }
}

impl From<GuardActivity> for GuardActivityBody {
    fn from(activity: GuardActivity) -> Self {
        Self {
            guard_name: activity.guard_name,
            count: activity.count,
            percentage: activity.percentage,
        }
    }
}

impl From<PatrolSummary> for PatrolSummaryBody {
    fn from(summary: PatrolSummary) -> Self {
        Self {
            total_scans: summary.total_scans,
            unique_checkpoints: summary.unique_checkpoints,
            unique_guards: summary.unique_guards,
            checkpoints: summary
                .checkpoints
                .into_iter()
                .map(CheckpointActivityBody::from)
                .collect(),
            guards: summary
                .guards
                .into_iter()
                .map(GuardActivityBody::from)
                .collect(),
        }
    }
}

/// Aggregate scan activity for reporting dashboards.
#[utoipa::path(
    get,
    path = "/api/v1/reports/summary",
    params(SummaryParams),
    responses(
        (status = 200, description = "Patrol activity summary", body = PatrolSummaryBody),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "getPatrolSummary"
)]
#[get("/reports/summary")]
pub async fn get_patrol_summary(
    state: web::Data<HttpState>,
    params: web::Query<SummaryParams>,
) -> ApiResult<web::Json<PatrolSummaryBody>> {
    let params = params.into_inner();
    let summary = state
        .reports
        .summary(TimeRange {
            start_time: params.start_time,
            end_time: params.end_time,
        })
        .await?;
    Ok(web::Json(PatrolSummaryBody::from(summary)))
}

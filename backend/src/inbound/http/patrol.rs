//! Patrol record HTTP handlers.
//!
//! ```text
//! POST /api/v1/patrol-records
//! GET  /api/v1/patrol-records
//! GET  /api/v1/patrol-records/{id}
//! GET  /api/v1/patrol-images/{image_id}
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use pagination::PageEnvelope;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ListRecordsRequest, RecordFilter};
use crate::domain::{
    Error, NewPatrolRecord, NewPatrolRecordDraft, PatrolRecord,
    patrol_record::{MAX_CHECKPOINT_LENGTH, MAX_GUARD_NAME_LENGTH},
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, TimestampValue, check_length, normalize_timestamp, page_request, parse_image_id,
    parse_uuid,
};

use crate::inbound::http::schemas::ErrorSchema;

/// Request payload for recording a scan event.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatrolRecordRequestBody {
    /// Caller-supplied record identifier (UUID string).
    #[schema(format = "uuid")]
    pub id: String,
    /// Checkpoint that was scanned (1-10 characters).
    pub checkpoint: String,
    /// Reporting guard's name (1-100 characters).
    pub guard_name: String,
    /// Device-recorded timestamp, as integer or numeric string.
    #[schema(value_type = String)]
    pub client_time: TimestampValue,
    /// Ingestion timestamp, as integer or numeric string.
    #[schema(value_type = String)]
    pub server_time: TimestampValue,
    /// Identifier correlating the record to a stored image.
    pub image_id: String,
    /// Free-text annotation; defaults to the empty string.
    #[serde(default)]
    pub note: String,
}

/// A stored patrol record as returned to clients.
///
/// Timestamps serialize as strings for device compatibility; they parse back
/// to the integers that were ingested.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatrolRecordResponseBody {
    /// Record identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Checkpoint that was scanned.
    pub checkpoint: String,
    /// Reporting guard's name.
    pub guard_name: String,
    /// Device-recorded timestamp.
    pub client_time: String,
    /// Ingestion timestamp.
    pub server_time: String,
    /// Image correlation identifier.
    pub image_id: String,
    /// Free-text annotation; empty string means no note.
    pub note: String,
}

impl From<PatrolRecord> for PatrolRecordResponseBody {
    fn from(record: PatrolRecord) -> Self {
        Self {
            id: record.id().to_string(),
            checkpoint: record.checkpoint().to_owned(),
            guard_name: record.guard_name().to_owned(),
            client_time: record.client_time().to_string(),
            server_time: record.server_time().to_string(),
            image_id: record.image_id().to_string(),
            note: record.note().to_owned(),
        }
    }
}

/// One page of patrol records plus pagination arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatrolRecordPageBody {
    /// The page slice, most recent scan first.
    pub records: Vec<PatrolRecordResponseBody>,
    /// Total records matching the filters.
    pub total: u64,
    /// Total pages at the requested page size.
    pub total_pages: u64,
    /// The 1-indexed page returned.
    pub current_page: u32,
    /// Number of records actually returned.
    pub page_size: u32,
}

impl From<PageEnvelope<PatrolRecord>> for PatrolRecordPageBody {
    fn from(envelope: PageEnvelope<PatrolRecord>) -> Self {
        let envelope = envelope.map(PatrolRecordResponseBody::from);
        Self {
            records: envelope.records,
            total: envelope.total,
            total_pages: envelope.total_pages,
            current_page: envelope.current_page,
            page_size: envelope.page_size,
        }
    }
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRecordsParams {
    /// 1-indexed page number; defaults to 1.
    pub page: Option<u32>,
    /// Records per page (1-100); defaults to 10.
    pub page_size: Option<u32>,
    /// Exact checkpoint match.
    pub checkpoint: Option<String>,
    /// Case-sensitive guard-name substring match.
    pub guard_name: Option<String>,
    /// Inclusive lower bound on the device-recorded timestamp.
    pub start_time: Option<i64>,
    /// Inclusive upper bound on the device-recorded timestamp.
    pub end_time: Option<i64>,
    /// `true` restricts to records carrying a non-empty note.
    pub has_notes: Option<bool>,
}

fn parse_new_record(payload: CreatePatrolRecordRequestBody) -> Result<NewPatrolRecord, Error> {
    let id = parse_uuid(payload.id, FieldName::new("id"))?;
    check_length(
        &payload.checkpoint,
        FieldName::new("checkpoint"),
        1,
        MAX_CHECKPOINT_LENGTH,
    )?;
    check_length(
        &payload.guard_name,
        FieldName::new("guardName"),
        1,
        MAX_GUARD_NAME_LENGTH,
    )?;
    let client_time = normalize_timestamp(payload.client_time, FieldName::new("clientTime"))?;
    let server_time = normalize_timestamp(payload.server_time, FieldName::new("serverTime"))?;
    let image_id = parse_image_id(payload.image_id, FieldName::new("imageId"))?;

    NewPatrolRecord::new(NewPatrolRecordDraft {
        id,
        checkpoint: payload.checkpoint,
        guard_name: payload.guard_name,
        client_time,
        server_time,
        image_id,
        note: payload.note,
    })
    .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Record a scan event, with best-effort camera capture.
#[utoipa::path(
    post,
    path = "/api/v1/patrol-records",
    request_body = CreatePatrolRecordRequestBody,
    responses(
        (status = 201, description = "Patrol record created", body = PatrolRecordResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Record id already exists", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["patrol-records"],
    operation_id = "createPatrolRecord"
)]
#[post("/patrol-records")]
pub async fn create_patrol_record(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePatrolRecordRequestBody>,
) -> ApiResult<HttpResponse> {
    let record = parse_new_record(payload.into_inner())?;
    info!(
        record_id = %record.id(),
        checkpoint = record.checkpoint(),
        guard_name = record.guard_name(),
        "patrol record received"
    );
    let stored = state.records_command.create_record(record).await?;
    Ok(HttpResponse::Created().json(PatrolRecordResponseBody::from(stored)))
}

/// List recorded scans, filtered and paginated, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/patrol-records",
    params(ListRecordsParams),
    responses(
        (status = 200, description = "One page of patrol records", body = PatrolRecordPageBody),
        (status = 400, description = "Invalid filters or pagination", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["patrol-records"],
    operation_id = "listPatrolRecords"
)]
#[get("/patrol-records")]
pub async fn list_patrol_records(
    state: web::Data<HttpState>,
    params: web::Query<ListRecordsParams>,
) -> ApiResult<web::Json<PatrolRecordPageBody>> {
    let params = params.into_inner();
    let page = page_request(params.page, params.page_size)?;
    let request = ListRecordsRequest {
        filter: RecordFilter {
            checkpoint: params.checkpoint,
            guard_name: params.guard_name,
            start_time: params.start_time,
            end_time: params.end_time,
            has_notes: params.has_notes,
        },
        page,
    };
    let envelope = state.records_query.list_records(request).await?;
    Ok(web::Json(PatrolRecordPageBody::from(envelope)))
}

/// Fetch a single patrol record by id.
#[utoipa::path(
    get,
    path = "/api/v1/patrol-records/{id}",
    params(("id" = String, Path, description = "Record identifier (UUID)")),
    responses(
        (status = 200, description = "The patrol record", body = PatrolRecordResponseBody),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such record", body = ErrorSchema)
    ),
    tags = ["patrol-records"],
    operation_id = "getPatrolRecord"
)]
#[get("/patrol-records/{id}")]
pub async fn get_patrol_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatrolRecordResponseBody>> {
    let id = parse_uuid(path.into_inner(), FieldName::new("id"))?;
    let record = state.records_query.get_record(id).await?;
    Ok(web::Json(PatrolRecordResponseBody::from(record)))
}

/// Fetch the stored image for an image id.
///
/// Blobs are served with a fixed JPEG content type; see the image store
/// contract for the write-side extension policy.
#[utoipa::path(
    get,
    path = "/api/v1/patrol-images/{image_id}",
    params(("image_id" = String, Path, description = "Image identifier")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/jpeg"),
        (status = 400, description = "Malformed image id", body = ErrorSchema),
        (status = 404, description = "No stored image", body = ErrorSchema)
    ),
    tags = ["patrol-records"],
    operation_id = "getPatrolImage"
)]
#[get("/patrol-images/{image_id}")]
pub async fn get_patrol_image(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let image_id = parse_image_id(path.into_inner(), FieldName::new("imageId"))?;
    let bytes = state
        .images
        .get_image(&image_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("image {image_id} not found")))?;
    Ok(HttpResponse::Ok()
        .content_type("image/jpeg")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename={image_id}.jpg"),
        ))
        .body(bytes))
}

#[cfg(test)]
#[path = "patrol_tests.rs"]
mod tests;

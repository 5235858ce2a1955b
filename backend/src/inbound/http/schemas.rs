//! OpenAPI schema wrappers for domain types.
//!
//! The domain stays free of utoipa derives; these mirrors exist only so the
//! generated document can describe error payloads.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Stable error code identifiers, mirroring `domain::ErrorCode`.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state.
    Conflict,
    /// A required backing service is unavailable.
    ServiceUnavailable,
    /// An unexpected internal error.
    InternalError,
}

/// Error payload shape, mirroring `domain::Error`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    pub code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "id must be a valid UUID")]
    pub message: String,
    /// Supplementary structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Request trace identifier for log correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

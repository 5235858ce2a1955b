//! Shared validation helpers for inbound HTTP adapters.
//!
//! Each helper turns a raw request value into a domain type, or a
//! client-error [`Error`] carrying a stable detail code and the offending
//! field name.

use pagination::{PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ImageId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidTimestamp,
    InvalidImageId,
    InvalidPagination,
    InvalidLength,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidImageId => "invalid_image_id",
            Self::InvalidPagination => "invalid_pagination",
            Self::InvalidLength => "invalid_length",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// A timestamp that arrives either as a JSON number or a numeric string.
///
/// Scanning devices in the field send both encodings; the unit is opaque to
/// this service either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TimestampValue {
    /// Integer encoding.
    Number(i64),
    /// String encoding of an integer.
    Text(String),
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a valid UUID"),
            ErrorCode::InvalidUuid,
            &value,
        )
    })
}

/// Normalize a numeric-or-string timestamp to its integer value.
pub(crate) fn normalize_timestamp(value: TimestampValue, field: FieldName) -> Result<i64, Error> {
    match value {
        TimestampValue::Number(number) => Ok(number),
        TimestampValue::Text(text) => text.trim().parse::<i64>().map_err(|_| {
            let name = field.as_str();
            field_error(
                field,
                format!("{name} must be an integer timestamp"),
                ErrorCode::InvalidTimestamp,
                &text,
            )
        }),
    }
}

pub(crate) fn parse_image_id(value: String, field: FieldName) -> Result<ImageId, Error> {
    ImageId::new(value.clone()).map_err(|err| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} is not a valid image id: {err}"),
            ErrorCode::InvalidImageId,
            &value,
        )
    })
}

/// Build a validated page request from optional query parameters.
pub(crate) fn page_request(page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, Error> {
    let page = page.unwrap_or(1);
    let page_size = page_size.unwrap_or(pagination::DEFAULT_PAGE_SIZE);
    PageRequest::new(page, page_size).map_err(|err| {
        let field = match err {
            PageRequestError::PageOutOfRange => "page",
            PageRequestError::PageSizeOutOfRange => "pageSize",
        };
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "code": ErrorCode::InvalidPagination.as_str(),
        }))
    })
}

/// Reject a field whose character count lies outside `min..=max`.
pub(crate) fn check_length(
    value: &str,
    field: FieldName,
    min: usize,
    max: usize,
) -> Result<(), Error> {
    let count = value.chars().count();
    if count < min || count > max {
        let name = field.as_str();
        return Err(field_error(
            field,
            format!("{name} must be between {min} and {max} characters"),
            ErrorCode::InvalidLength,
            value,
        ));
    }
    Ok(())
}

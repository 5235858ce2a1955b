//! Domain entities, ports, and services.
//!
//! Purpose: define the strongly typed core of the patrol pipeline — scan
//! records, image identifiers, the camera map — together with the ports at
//! the hexagonal boundary and the services composing them. Types are
//! immutable once constructed; invariants live in validating constructors.

pub mod camera_map;
pub mod error;
pub mod image_id;
pub mod image_service;
pub mod patrol_record;
pub mod patrol_service;
pub mod ports;
pub mod report_service;

pub use self::camera_map::{CameraMap, CameraMapError};
pub use self::error::{Error, ErrorCode};
pub use self::image_id::{ImageId, ImageIdValidationError};
pub use self::image_service::ImageService;
pub use self::patrol_record::{
    NewPatrolRecord, NewPatrolRecordDraft, PatrolRecord, PatrolRecordParts,
    PatrolRecordValidationError,
};
pub use self::patrol_service::PatrolService;
pub use self::report_service::ReportService;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;

//! Port for fetching a still image from a network camera.

use async_trait::async_trait;
use url::Url;

/// A snapshot returned by a camera endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraSnapshot {
    /// Raw response body; assumed to be image data.
    pub bytes: Vec<u8>,
    /// Content type reported by the camera, when present.
    pub content_type: Option<String>,
}

/// Classified failures of a camera fetch.
///
/// Callers on the best-effort path absorb every variant into an absent
/// outcome; the classification exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraSnapshotError {
    /// The request exceeded the configured timeout.
    #[error("camera fetch timed out: {message}")]
    Timeout {
        /// Transport-provided failure description.
        message: String,
    },
    /// The camera answered with a non-success status.
    #[error("camera returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },
    /// Any other transport failure (DNS, connect, read).
    #[error("camera fetch failed: {message}")]
    Transport {
        /// Transport-provided failure description.
        message: String,
    },
}

impl CameraSnapshotError {
    /// A timeout failure with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// A non-success status failure.
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// A transport failure with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Port for a single bounded-timeout snapshot fetch from a camera endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CameraSnapshotSource: Send + Sync {
    /// Issue one GET against the endpoint and return the body bytes.
    async fn fetch(&self, endpoint: &Url) -> Result<CameraSnapshot, CameraSnapshotError>;
}

/// Fixture implementation whose fetches always time out.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCameraSnapshotSource;

#[async_trait]
impl CameraSnapshotSource for FixtureCameraSnapshotSource {
    async fn fetch(&self, _endpoint: &Url) -> Result<CameraSnapshot, CameraSnapshotError> {
        Err(CameraSnapshotError::timeout("fixture camera never answers"))
    }
}

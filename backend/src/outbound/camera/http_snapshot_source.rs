//! Reqwest-backed camera snapshot adapter.
//!
//! This adapter owns transport details only: one GET per fetch, a
//! client-level timeout, and classification of failures into the port's
//! error variants. It never retries; the best-effort policy lives in the
//! domain service consuming it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::domain::ports::{CameraSnapshot, CameraSnapshotError, CameraSnapshotSource};

/// Default bound on a single snapshot fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Snapshot source performing HTTP GET requests against camera endpoints.
pub struct HttpSnapshotSource {
    client: Client,
}

impl HttpSnapshotSource {
    /// Build an adapter whose requests abort after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn map_transport_error(error: reqwest::Error) -> CameraSnapshotError {
    if error.is_timeout() {
        CameraSnapshotError::timeout(error.to_string())
    } else {
        CameraSnapshotError::transport(error.to_string())
    }
}

#[async_trait]
impl CameraSnapshotSource for HttpSnapshotSource {
    async fn fetch(&self, endpoint: &Url) -> Result<CameraSnapshot, CameraSnapshotError> {
        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CameraSnapshotError::status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok(CameraSnapshot {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

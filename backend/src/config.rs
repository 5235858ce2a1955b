//! Application configuration loaded via OrthoConfig.
//!
//! Every knob arrives from the environment (prefix `GUARDPOST`), CLI
//! arguments, or a configuration file; secrets such as camera credentials
//! live in the referenced camera map document, never in code.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{CameraMap, CameraMapError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IMAGE_STORAGE_DIR: &str = "./storage/images";
const DEFAULT_CAMERA_FETCH_TIMEOUT_SECS: u64 = 10;

/// Configuration values for the Guardpost backend process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GUARDPOST")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL for the patrol record store.
    pub database_url: Option<String>,
    /// Directory holding stored patrol images.
    pub image_storage_dir: Option<PathBuf>,
    /// Path to the JSON camera map document; absent means no cameras.
    pub camera_map_path: Option<PathBuf>,
    /// Bound on a single camera snapshot fetch, in seconds.
    pub camera_fetch_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Database URL; required to start the server.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Image storage directory, falling back to `./storage/images`.
    pub fn image_storage_dir(&self) -> PathBuf {
        self.image_storage_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_STORAGE_DIR))
    }

    /// Camera fetch timeout, falling back to 10 seconds.
    pub fn camera_fetch_timeout(&self) -> Duration {
        Duration::from_secs(
            self.camera_fetch_timeout_secs
                .unwrap_or(DEFAULT_CAMERA_FETCH_TIMEOUT_SECS),
        )
    }

    /// Load the camera map from the configured path.
    ///
    /// An unset path yields an empty map — a deployment without cameras is
    /// a normal configuration, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CameraMapError`] when a configured document cannot be read
    /// or parsed.
    pub fn camera_map(&self) -> Result<CameraMap, CameraMapError> {
        match &self.camera_map_path {
            Some(path) => CameraMap::from_path(path),
            None => Ok(CameraMap::empty()),
        }
    }
}

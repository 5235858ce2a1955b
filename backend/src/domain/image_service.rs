//! Best-effort image acquisition and retrieval service.
//!
//! Composes the camera map, the snapshot source, and the image store. The
//! capture path is an enhancement to a patrol record, not a precondition:
//! every failure along it collapses to an absent outcome consumed only for
//! logging.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::camera_map::CameraMap;
use crate::domain::ports::{CameraSnapshotSource, ImageStore, ImageStoreError};
use crate::domain::{Error, ImageId};

fn map_store_error(error: ImageStoreError) -> Error {
    match error {
        ImageStoreError::Io { message } => {
            Error::internal(format!("image store failure: {message}"))
        }
    }
}

/// Service composing camera capture with blob storage.
#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ImageStore>,
    camera: Arc<dyn CameraSnapshotSource>,
    cameras: CameraMap,
}

impl ImageService {
    /// Create the service from its collaborators and the camera map.
    pub fn new(
        store: Arc<dyn ImageStore>,
        camera: Arc<dyn CameraSnapshotSource>,
        cameras: CameraMap,
    ) -> Self {
        Self {
            store,
            camera,
            cameras,
        }
    }

    /// Fetch a snapshot for the checkpoint's camera and store it under the
    /// image id. Returns the stored path, or `None` when the checkpoint has
    /// no camera or any step failed.
    ///
    /// Unmapped checkpoints are the common case and skip network I/O
    /// entirely. No failure on this path ever propagates to the caller.
    pub async fn fetch_and_save_for_checkpoint(
        &self,
        image_id: &ImageId,
        checkpoint: &str,
    ) -> Option<PathBuf> {
        let Some(endpoint) = self.cameras.endpoint_for(checkpoint) else {
            debug!(checkpoint, "no camera mapped for checkpoint");
            return None;
        };

        let snapshot = match self.camera.fetch(endpoint).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(checkpoint, error = %err, "camera fetch failed");
                return None;
            }
        };
        if let Some(content_type) = snapshot
            .content_type
            .as_deref()
            .filter(|value| !value.starts_with("image/"))
        {
            // Camera firmware frequently omits or mislabels the header.
            warn!(checkpoint, content_type, "camera response is not labelled as an image");
        }

        match self.store.save(image_id, &snapshot.bytes).await {
            Ok(stored) => {
                info!(
                    checkpoint,
                    image_id = %image_id,
                    bytes = snapshot.bytes.len(),
                    path = %stored.path.display(),
                    "camera snapshot stored"
                );
                Some(stored.path)
            }
            Err(err) => {
                error!(checkpoint, image_id = %image_id, error = %err, "saving camera snapshot failed");
                None
            }
        }
    }

    /// Read a stored blob; `None` when no blob exists for the id.
    ///
    /// # Errors
    ///
    /// Returns a server error when the backing store fails.
    pub async fn get_image(&self, image_id: &ImageId) -> Result<Option<Vec<u8>>, Error> {
        self.store.get(image_id).await.map_err(map_store_error)
    }

    /// Write a blob directly, bypassing camera capture.
    ///
    /// # Errors
    ///
    /// Returns a server error when the backing store fails.
    pub async fn save_image(&self, image_id: &ImageId, bytes: &[u8]) -> Result<PathBuf, Error> {
        self.store
            .save(image_id, bytes)
            .await
            .map(|stored| stored.path)
            .map_err(map_store_error)
    }

    /// Remove a stored blob; returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns a server error when the backing store fails.
    pub async fn delete_image(&self, image_id: &ImageId) -> Result<bool, Error> {
        self.store.delete(image_id).await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "image_service_tests.rs"]
mod tests;

//! Port for durable image blob storage.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ImageId;

/// Location of a blob written by [`ImageStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Adapter-specific location of the stored blob.
    pub path: PathBuf,
}

/// Errors raised by image store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageStoreError {
    /// The backing medium failed to read or write the blob.
    #[error("image store I/O failed: {message}")]
    Io {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl ImageStoreError {
    /// An I/O failure with the given message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Port for writing, probing, and removing image blobs keyed by [`ImageId`].
///
/// Absence is a normal outcome for `get` and `delete`, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write the blob, replacing any previous content for the same id.
    async fn save(&self, image_id: &ImageId, bytes: &[u8])
    -> Result<StoredImage, ImageStoreError>;

    /// Read the blob, probing recognised extension variants in priority
    /// order; `None` when no variant exists.
    async fn get(&self, image_id: &ImageId) -> Result<Option<Vec<u8>>, ImageStoreError>;

    /// Remove the first matching extension variant; returns whether anything
    /// was removed.
    async fn delete(&self, image_id: &ImageId) -> Result<bool, ImageStoreError>;
}

/// Fixture implementation for tests that do not exercise blob storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureImageStore;

#[async_trait]
impl ImageStore for FixtureImageStore {
    async fn save(
        &self,
        image_id: &ImageId,
        _bytes: &[u8],
    ) -> Result<StoredImage, ImageStoreError> {
        Ok(StoredImage {
            path: PathBuf::from(format!("{image_id}.jpg")),
        })
    }

    async fn get(&self, _image_id: &ImageId) -> Result<Option<Vec<u8>>, ImageStoreError> {
        Ok(None)
    }

    async fn delete(&self, _image_id: &ImageId) -> Result<bool, ImageStoreError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    //! Fixture behaviour coverage.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_reports_absence() {
        let store = FixtureImageStore;
        let id = ImageId::new("img-1").expect("valid image id");
        assert!(store.get(&id).await.expect("fixture get succeeds").is_none());
        assert!(!store.delete(&id).await.expect("fixture delete succeeds"));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_save_reports_a_jpg_location() {
        let store = FixtureImageStore;
        let id = ImageId::new("img-1").expect("valid image id");
        let stored = store.save(&id, b"bytes").await.expect("fixture save succeeds");
        assert_eq!(stored.path, PathBuf::from("img-1.jpg"));
    }
}

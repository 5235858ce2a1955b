//! Filesystem-backed `ImageStore` implementation.
//!
//! Blobs are written as `<dir>/<image_id>.jpg` regardless of actual
//! encoding; reads probe `.jpg`, `.jpeg`, then `.png` so blobs placed by
//! out-of-band writers are still found. The write/read extension asymmetry
//! is inherited from the device fleet's expectations and kept deliberate.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::ImageId;
use crate::domain::ports::{ImageStore, ImageStoreError, StoredImage};

/// Extension written by [`ImageStore::save`].
const WRITE_EXTENSION: &str = "jpg";

/// Extensions probed on read, in priority order.
const READ_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

fn map_io_error(error: std::io::Error) -> ImageStoreError {
    ImageStoreError::io(error.to_string())
}

/// Image store rooted at a storage directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    storage_dir: PathBuf,
}

impl FsImageStore {
    /// Create the store, creating the storage directory if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStoreError`] when the directory cannot be created.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Result<Self, ImageStoreError> {
        let storage_dir = storage_dir.into();
        std::fs::create_dir_all(&storage_dir).map_err(map_io_error)?;
        Ok(Self { storage_dir })
    }

    /// Root directory holding the blobs.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn path_for(&self, image_id: &ImageId, extension: &str) -> PathBuf {
        self.storage_dir
            .join(format!("{}.{extension}", image_id.as_str()))
    }

    /// First existing extension variant for the id, in probe order.
    async fn find_existing(&self, image_id: &ImageId) -> Option<PathBuf> {
        for extension in READ_EXTENSIONS {
            let candidate = self.path_for(image_id, extension);
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                return Some(candidate);
            }
        }
        None
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn save(
        &self,
        image_id: &ImageId,
        bytes: &[u8],
    ) -> Result<StoredImage, ImageStoreError> {
        let path = self.path_for(image_id, WRITE_EXTENSION);
        tokio::fs::write(&path, bytes).await.map_err(map_io_error)?;
        Ok(StoredImage { path })
    }

    async fn get(&self, image_id: &ImageId) -> Result<Option<Vec<u8>>, ImageStoreError> {
        let Some(path) = self.find_existing(image_id).await else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            // Lost a race with a concurrent delete; absence is normal.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(map_io_error(err)),
        }
    }

    async fn delete(&self, image_id: &ImageId) -> Result<bool, ImageStoreError> {
        let Some(path) = self.find_existing(image_id).await else {
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(map_io_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Extension probing and lifecycle coverage on a temporary directory.

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn storage() -> (TempDir, FsImageStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = FsImageStore::new(dir.path().join("images")).expect("store creates its dir");
        (dir, store)
    }

    fn image_id(value: &str) -> ImageId {
        ImageId::new(value).expect("valid image id")
    }

    #[rstest]
    #[tokio::test]
    async fn save_writes_a_jpg_and_get_reads_it_back(storage: (TempDir, FsImageStore)) {
        let (_dir, store) = storage;
        let id = image_id("scan-1");

        let stored = store.save(&id, b"jpeg bytes").await.expect("save succeeds");
        assert!(stored.path.ends_with("scan-1.jpg"));

        let bytes = store
            .get(&id)
            .await
            .expect("get succeeds")
            .expect("blob present");
        assert_eq!(bytes, b"jpeg bytes");
    }

    #[rstest]
    #[tokio::test]
    async fn save_overwrites_previous_content(storage: (TempDir, FsImageStore)) {
        let (_dir, store) = storage;
        let id = image_id("scan-2");

        store.save(&id, b"first").await.expect("first save");
        store.save(&id, b"second").await.expect("second save");

        let bytes = store
            .get(&id)
            .await
            .expect("get succeeds")
            .expect("blob present");
        assert_eq!(bytes, b"second");
    }

    #[rstest]
    #[tokio::test]
    async fn absent_blob_is_none_not_an_error(storage: (TempDir, FsImageStore)) {
        let (_dir, store) = storage;
        assert!(
            store
                .get(&image_id("never-saved"))
                .await
                .expect("get succeeds")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn read_probes_alternate_extensions_in_order(storage: (TempDir, FsImageStore)) {
        let (_dir, store) = storage;
        let id = image_id("scan-3");

        // An out-of-band writer left a PNG; probing should find it.
        tokio::fs::write(store.storage_dir().join("scan-3.png"), b"png bytes")
            .await
            .expect("write png variant");
        let bytes = store
            .get(&id)
            .await
            .expect("get succeeds")
            .expect("png variant found");
        assert_eq!(bytes, b"png bytes");

        // A jpg variant outranks the png once present.
        tokio::fs::write(store.storage_dir().join("scan-3.jpg"), b"jpg bytes")
            .await
            .expect("write jpg variant");
        let bytes = store
            .get(&id)
            .await
            .expect("get succeeds")
            .expect("jpg variant preferred");
        assert_eq!(bytes, b"jpg bytes");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_one_variant_and_reports_absence_after(
        storage: (TempDir, FsImageStore),
    ) {
        let (_dir, store) = storage;
        let id = image_id("scan-4");

        store.save(&id, b"bytes").await.expect("save succeeds");
        assert!(store.delete(&id).await.expect("delete succeeds"));
        assert!(!store.delete(&id).await.expect("second delete succeeds"));
        assert!(store.get(&id).await.expect("get succeeds").is_none());
    }
}

//! Driving port for patrol image retrieval.

use async_trait::async_trait;

use crate::domain::{Error, ImageId};

/// Port for the get-image use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatrolImageQuery: Send + Sync {
    /// Return the stored image bytes, or `None` when no blob exists.
    ///
    /// Absence is a normal outcome; the HTTP adapter turns it into a 404.
    async fn get_image(&self, image_id: &ImageId) -> Result<Option<Vec<u8>>, Error>;
}

/// Fixture implementation that stores no images.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePatrolImageQuery;

#[async_trait]
impl PatrolImageQuery for FixturePatrolImageQuery {
    async fn get_image(&self, _image_id: &ImageId) -> Result<Option<Vec<u8>>, Error> {
        Ok(None)
    }
}

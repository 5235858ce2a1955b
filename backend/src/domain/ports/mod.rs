//! Domain ports and supporting types for the hexagonal boundary.

mod camera_snapshot_source;
mod image_store;
mod patrol_command;
mod patrol_image_query;
mod patrol_query;
mod patrol_record_repository;
mod report_query;

#[cfg(test)]
pub use camera_snapshot_source::MockCameraSnapshotSource;
pub use camera_snapshot_source::{
    CameraSnapshot, CameraSnapshotError, CameraSnapshotSource, FixtureCameraSnapshotSource,
};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{FixtureImageStore, ImageStore, ImageStoreError, StoredImage};
#[cfg(test)]
pub use patrol_command::MockPatrolRecordsCommand;
pub use patrol_command::{FixturePatrolRecordsCommand, PatrolRecordsCommand};
#[cfg(test)]
pub use patrol_image_query::MockPatrolImageQuery;
pub use patrol_image_query::{FixturePatrolImageQuery, PatrolImageQuery};
#[cfg(test)]
pub use patrol_query::MockPatrolRecordsQuery;
pub use patrol_query::{
    FixturePatrolRecordsQuery, ListRecordsRequest, PatrolRecordsQuery, RecordFilter,
};
#[cfg(test)]
pub use patrol_record_repository::MockPatrolRecordRepository;
pub use patrol_record_repository::{
    FixturePatrolRecordRepository, PatrolRecordRepository, PatrolRecordRepositoryError,
    RecordPage, RecordPredicate, TextField, TimeField,
};
#[cfg(test)]
pub use report_query::MockPatrolReportsQuery;
pub use report_query::{
    CheckpointActivity, FixturePatrolReportsQuery, GuardActivity, PatrolReportsQuery,
    PatrolSummary, TimeRange,
};

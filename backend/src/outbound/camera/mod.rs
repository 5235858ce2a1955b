//! Outbound adapters for camera transport.

mod http_snapshot_source;

pub use http_snapshot_source::{DEFAULT_FETCH_TIMEOUT, HttpSnapshotSource};

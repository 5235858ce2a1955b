//! Patrol record entities.
//!
//! A [`NewPatrolRecord`] is a validated scan event ready for insertion; a
//! [`PatrolRecord`] is a stored row including the server-assigned audit
//! timestamps. Both are constructed through validating constructors so an
//! out-of-range field is unrepresentable past the boundary.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::image_id::ImageId;

/// Longest accepted checkpoint identifier.
pub const MAX_CHECKPOINT_LENGTH: usize = 10;

/// Longest accepted guard name.
pub const MAX_GUARD_NAME_LENGTH: usize = 100;

/// Validation failures for patrol record construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatrolRecordValidationError {
    /// Checkpoint identifiers are 1 to [`MAX_CHECKPOINT_LENGTH`] characters.
    #[error("checkpoint must be between 1 and {MAX_CHECKPOINT_LENGTH} characters")]
    CheckpointLength,
    /// Guard names are 1 to [`MAX_GUARD_NAME_LENGTH`] characters.
    #[error("guard name must be between 1 and {MAX_GUARD_NAME_LENGTH} characters")]
    GuardNameLength,
}

fn validate_lengths(checkpoint: &str, guard_name: &str) -> Result<(), PatrolRecordValidationError> {
    let checkpoint_chars = checkpoint.chars().count();
    if checkpoint_chars == 0 || checkpoint_chars > MAX_CHECKPOINT_LENGTH {
        return Err(PatrolRecordValidationError::CheckpointLength);
    }
    let guard_chars = guard_name.chars().count();
    if guard_chars == 0 || guard_chars > MAX_GUARD_NAME_LENGTH {
        return Err(PatrolRecordValidationError::GuardNameLength);
    }
    Ok(())
}

/// Unvalidated input for a new patrol record.
#[derive(Debug, Clone)]
pub struct NewPatrolRecordDraft {
    /// Caller-supplied record identifier.
    pub id: Uuid,
    /// Physical patrol point that was scanned.
    pub checkpoint: String,
    /// Name of the reporting guard.
    pub guard_name: String,
    /// Timestamp recorded by the scanning device; unit is caller-defined.
    pub client_time: i64,
    /// Timestamp recorded at ingestion.
    pub server_time: i64,
    /// Identifier correlating the record to a stored image blob.
    pub image_id: ImageId,
    /// Free-text annotation; empty string means no note.
    pub note: String,
}

/// A validated scan event ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatrolRecord {
    id: Uuid,
    checkpoint: String,
    guard_name: String,
    client_time: i64,
    server_time: i64,
    image_id: ImageId,
    note: String,
}

impl NewPatrolRecord {
    /// Validate a draft into an insertable record.
    ///
    /// # Errors
    ///
    /// Returns [`PatrolRecordValidationError`] when the checkpoint or guard
    /// name length is out of range.
    pub fn new(draft: NewPatrolRecordDraft) -> Result<Self, PatrolRecordValidationError> {
        validate_lengths(&draft.checkpoint, &draft.guard_name)?;
        Ok(Self {
            id: draft.id,
            checkpoint: draft.checkpoint,
            guard_name: draft.guard_name,
            client_time: draft.client_time,
            server_time: draft.server_time,
            image_id: draft.image_id,
            note: draft.note,
        })
    }

    /// Caller-supplied record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Physical patrol point that was scanned.
    pub fn checkpoint(&self) -> &str {
        &self.checkpoint
    }

    /// Name of the reporting guard.
    pub fn guard_name(&self) -> &str {
        &self.guard_name
    }

    /// Timestamp recorded by the scanning device.
    pub fn client_time(&self) -> i64 {
        self.client_time
    }

    /// Timestamp recorded at ingestion.
    pub fn server_time(&self) -> i64 {
        self.server_time
    }

    /// Image blob correlation identifier.
    pub fn image_id(&self) -> &ImageId {
        &self.image_id
    }

    /// Free-text annotation; empty string means no note.
    pub fn note(&self) -> &str {
        &self.note
    }
}

/// Field values of a stored patrol record row.
#[derive(Debug, Clone)]
pub struct PatrolRecordParts {
    /// Record identifier.
    pub id: Uuid,
    /// Physical patrol point that was scanned.
    pub checkpoint: String,
    /// Name of the reporting guard.
    pub guard_name: String,
    /// Timestamp recorded by the scanning device.
    pub client_time: i64,
    /// Timestamp recorded at ingestion.
    pub server_time: i64,
    /// Image blob correlation identifier.
    pub image_id: ImageId,
    /// Free-text annotation.
    pub note: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A stored patrol record, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatrolRecord {
    id: Uuid,
    checkpoint: String,
    guard_name: String,
    client_time: i64,
    server_time: i64,
    image_id: ImageId,
    note: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PatrolRecord {
    /// Reconstruct a stored record from its parts, revalidating invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PatrolRecordValidationError`] when a stored row violates the
    /// length invariants; this indicates out-of-band writes to the table.
    pub fn new(parts: PatrolRecordParts) -> Result<Self, PatrolRecordValidationError> {
        validate_lengths(&parts.checkpoint, &parts.guard_name)?;
        Ok(Self {
            id: parts.id,
            checkpoint: parts.checkpoint,
            guard_name: parts.guard_name,
            client_time: parts.client_time,
            server_time: parts.server_time,
            image_id: parts.image_id,
            note: parts.note,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        })
    }

    /// Record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Physical patrol point that was scanned.
    pub fn checkpoint(&self) -> &str {
        &self.checkpoint
    }

    /// Name of the reporting guard.
    pub fn guard_name(&self) -> &str {
        &self.guard_name
    }

    /// Timestamp recorded by the scanning device.
    pub fn client_time(&self) -> i64 {
        self.client_time
    }

    /// Timestamp recorded at ingestion.
    pub fn server_time(&self) -> i64 {
        self.server_time
    }

    /// Image blob correlation identifier.
    pub fn image_id(&self) -> &ImageId {
        &self.image_id
    }

    /// Free-text annotation; empty string means no note.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Whether the record carries a non-empty note.
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    /// Server-assigned creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Server-assigned last-modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

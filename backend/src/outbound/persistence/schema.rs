//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed DDL exactly; migrations are
//! managed outside this service. Expected table:
//!
//! ```sql
//! CREATE TABLE patrol_records (
//!     id          UUID PRIMARY KEY,
//!     checkpoint  VARCHAR(10)  NOT NULL,
//!     guard_name  VARCHAR(100) NOT NULL,
//!     client_time BIGINT       NOT NULL,
//!     server_time BIGINT       NOT NULL,
//!     image_id    VARCHAR(100) NOT NULL,
//!     note        TEXT         NOT NULL DEFAULT '',
//!     created_at  TIMESTAMPTZ  NOT NULL DEFAULT now(),
//!     updated_at  TIMESTAMPTZ  NOT NULL DEFAULT now()
//! );
//! ```
//!
//! with indexes on `checkpoint`, `guard_name`, `client_time`, `server_time`,
//! and `image_id`.

diesel::table! {
    /// Patrol scan events, one row per checkpoint scan.
    ///
    /// The primary key is the caller-supplied UUID; rows are immutable after
    /// insertion.
    patrol_records (id) {
        /// Primary key: caller-supplied UUID.
        id -> Uuid,
        /// Checkpoint identifier (max 10 characters).
        #[max_length = 10]
        checkpoint -> Varchar,
        /// Reporting guard's name (max 100 characters).
        #[max_length = 100]
        guard_name -> Varchar,
        /// Device-recorded scan timestamp; unit is caller-defined.
        client_time -> Int8,
        /// Ingestion-recorded timestamp.
        server_time -> Int8,
        /// Image blob correlation identifier (max 100 characters).
        #[max_length = 100]
        image_id -> Varchar,
        /// Free-text annotation; empty string means no note.
        note -> Text,
        /// Row creation timestamp (database default).
        created_at -> Timestamptz,
        /// Last modification timestamp (database default).
        updated_at -> Timestamptz,
    }
}

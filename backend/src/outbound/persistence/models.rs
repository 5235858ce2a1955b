//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain; repositories translate them through the
//! validated domain constructors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::patrol_records;

/// Row struct for reading from the patrol_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patrol_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatrolRecordRow {
    pub id: Uuid,
    pub checkpoint: String,
    pub guard_name: String,
    pub client_time: i64,
    pub server_time: i64,
    pub image_id: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new patrol record rows.
///
/// Audit timestamps are omitted so the database defaults assign them.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patrol_records)]
pub(crate) struct NewPatrolRecordRow<'a> {
    pub id: Uuid,
    pub checkpoint: &'a str,
    pub guard_name: &'a str,
    pub client_time: i64,
    pub server_time: i64,
    pub image_id: &'a str,
    pub note: &'a str,
}

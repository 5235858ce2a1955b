//! PostgreSQL-backed `PatrolRecordRepository` implementation using Diesel.
//!
//! The typed predicate set is applied through an explicit match per variant
//! and field; the page slice and the total count run as two queries over the
//! same predicate conjunction. Count and slice need not observe the same
//! snapshot; minor skew under concurrent inserts is acceptable.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    PatrolRecordRepository, PatrolRecordRepositoryError, RecordPage, RecordPredicate, TextField,
    TimeField,
};
use crate::domain::{ImageId, NewPatrolRecord, PatrolRecord, PatrolRecordParts};

use super::models::{NewPatrolRecordRow, PatrolRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::patrol_records;

/// Diesel-backed implementation of the patrol record repository port.
#[derive(Clone)]
pub struct DieselPatrolRecordRepository {
    pool: DbPool,
}

impl DieselPatrolRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PatrolRecordRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PatrolRecordRepositoryError::connection(message)
}

fn map_diesel_error(error: diesel::result::Error) -> PatrolRecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PatrolRecordRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PatrolRecordRepositoryError::connection("database connection error")
        }
        _ => PatrolRecordRepositoryError::query("database error"),
    }
}

/// Insert-path mapping: a unique violation on the primary key is the
/// distinct duplicate-id failure, everything else falls through.
fn map_insert_error(id: Uuid, error: diesel::result::Error) -> PatrolRecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        return PatrolRecordRepositoryError::duplicate(id);
    }
    map_diesel_error(error)
}

/// Escape LIKE metacharacters so a substring needle matches literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Apply the predicate conjunction to a boxed query over `patrol_records`.
///
/// Expanded inline so the same match works for both the row query and the
/// count query, which box different select clauses.
macro_rules! apply_predicates {
    ($query:expr, $predicates:expr) => {{
        let mut query = $query;
        for predicate in $predicates {
            query = match predicate {
                RecordPredicate::Equals(field, value) => match field {
                    TextField::Checkpoint => {
                        query.filter(patrol_records::checkpoint.eq(value.clone()))
                    }
                    TextField::GuardName => {
                        query.filter(patrol_records::guard_name.eq(value.clone()))
                    }
                    TextField::Note => query.filter(patrol_records::note.eq(value.clone())),
                    TextField::ImageId => query.filter(patrol_records::image_id.eq(value.clone())),
                },
                RecordPredicate::Contains(field, value) => {
                    let pattern = format!("%{}%", escape_like(value));
                    match field {
                        TextField::Checkpoint => {
                            query.filter(patrol_records::checkpoint.like(pattern))
                        }
                        TextField::GuardName => {
                            query.filter(patrol_records::guard_name.like(pattern))
                        }
                        TextField::Note => query.filter(patrol_records::note.like(pattern)),
                        TextField::ImageId => query.filter(patrol_records::image_id.like(pattern)),
                    }
                }
                RecordPredicate::GreaterOrEqual(field, bound) => match field {
                    TimeField::ClientTime => query.filter(patrol_records::client_time.ge(*bound)),
                    TimeField::ServerTime => query.filter(patrol_records::server_time.ge(*bound)),
                },
                RecordPredicate::LessOrEqual(field, bound) => match field {
                    TimeField::ClientTime => query.filter(patrol_records::client_time.le(*bound)),
                    TimeField::ServerTime => query.filter(patrol_records::server_time.le(*bound)),
                },
                RecordPredicate::NotEquals(field, value) => match field {
                    TextField::Checkpoint => {
                        query.filter(patrol_records::checkpoint.ne(value.clone()))
                    }
                    TextField::GuardName => {
                        query.filter(patrol_records::guard_name.ne(value.clone()))
                    }
                    TextField::Note => query.filter(patrol_records::note.ne(value.clone())),
                    TextField::ImageId => query.filter(patrol_records::image_id.ne(value.clone())),
                },
            };
        }
        query
    }};
}

/// Convert a database row into a validated domain record.
fn row_to_record(row: PatrolRecordRow) -> Result<PatrolRecord, PatrolRecordRepositoryError> {
    let PatrolRecordRow {
        id,
        checkpoint,
        guard_name,
        client_time,
        server_time,
        image_id,
        note,
        created_at,
        updated_at,
    } = row;

    let image_id = ImageId::new(image_id)
        .map_err(|err| PatrolRecordRepositoryError::query(err.to_string()))?;

    PatrolRecord::new(PatrolRecordParts {
        id,
        checkpoint,
        guard_name,
        client_time,
        server_time,
        image_id,
        note,
        created_at,
        updated_at,
    })
    .map_err(|err| PatrolRecordRepositoryError::query(err.to_string()))
}

#[async_trait]
impl PatrolRecordRepository for DieselPatrolRecordRepository {
    async fn insert(
        &self,
        record: &NewPatrolRecord,
    ) -> Result<PatrolRecord, PatrolRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPatrolRecordRow {
            id: record.id(),
            checkpoint: record.checkpoint(),
            guard_name: record.guard_name(),
            client_time: record.client_time(),
            server_time: record.server_time(),
            image_id: record.image_id().as_str(),
            note: record.note(),
        };

        let row: PatrolRecordRow = diesel::insert_into(patrol_records::table)
            .values(&new_row)
            .returning(PatrolRecordRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(record.id(), err))?;

        row_to_record(row)
    }

    async fn query_paged(
        &self,
        predicates: &[RecordPredicate],
        page: PageRequest,
    ) -> Result<RecordPage, PatrolRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatrolRecordRow> = apply_predicates!(
            patrol_records::table
                .select(PatrolRecordRow::as_select())
                .into_boxed(),
            predicates
        )
        .order((
            patrol_records::client_time.desc(),
            patrol_records::created_at.asc(),
            patrol_records::id.asc(),
        ))
        .offset(page.offset())
        .limit(page.limit())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let total: i64 = apply_predicates!(
            patrol_records::table
                .select(diesel::dsl::count_star())
                .into_boxed(),
            predicates
        )
        .first(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let records = rows
            .into_iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordPage {
            records,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn query_all(
        &self,
        predicates: &[RecordPredicate],
    ) -> Result<Vec<PatrolRecord>, PatrolRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PatrolRecordRow> = apply_predicates!(
            patrol_records::table
                .select(PatrolRecordRow::as_select())
                .into_boxed(),
            predicates
        )
        .order((
            patrol_records::client_time.desc(),
            patrol_records::created_at.asc(),
            patrol_records::id.asc(),
        ))
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn get_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PatrolRecord>, PatrolRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = patrol_records::table
            .filter(patrol_records::id.eq(id))
            .select(PatrolRecordRow::as_select())
            .first::<PatrolRecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and needle escaping coverage; query execution is
    //! exercised against a live database outside this crate's unit suite.

    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("boom".to_owned()))
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_on_insert() {
        let id = Uuid::new_v4();
        let mapped = map_insert_error(id, database_error(DatabaseErrorKind::UniqueViolation));
        assert_eq!(mapped, PatrolRecordRepositoryError::duplicate(id));
    }

    #[rstest]
    fn other_insert_failures_stay_generic() {
        let mapped = map_insert_error(
            Uuid::new_v4(),
            database_error(DatabaseErrorKind::ForeignKeyViolation),
        );
        assert!(matches!(
            mapped,
            PatrolRecordRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection));
        assert!(matches!(
            mapped,
            PatrolRecordRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("pool exhausted"));
        assert_eq!(
            mapped,
            PatrolRecordRepositoryError::connection("pool exhausted")
        );
    }

    #[rstest]
    #[case::plain("jan", "jan")]
    #[case::percent("100%", "100\\%")]
    #[case::underscore("a_b", "a\\_b")]
    #[case::backslash("a\\b", "a\\\\b")]
    fn like_needles_match_literally(#[case] needle: &str, #[case] escaped: &str) {
        assert_eq!(escape_like(needle), escaped);
    }
}

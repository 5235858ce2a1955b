//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters only: repository implementations translate between Diesel
//! row structs and domain types. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) are internal implementation details, never
//! exposed to the domain layer. Connections come from a `bb8` pool with
//! native async support via `diesel-async`.

mod diesel_patrol_record_repository;
mod models;
mod pool;
mod schema;

pub use diesel_patrol_record_repository::DieselPatrolRecordRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

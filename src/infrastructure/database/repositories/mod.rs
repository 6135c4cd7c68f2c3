//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod repository_provider;
pub mod reservation_repository;
pub mod reservation_time_repository;
pub mod theme_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::domain::{ConflictKind, DomainError};

// ── Error mapping ───────────────────────────────────────────────

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Report a unique-constraint violation as the given conflict.
pub(crate) fn unique_violation_as(kind: ConflictKind) -> impl FnOnce(DbErr) -> DomainError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(kind),
        _ => db_err(e),
    }
}

/// Report a foreign-key violation as the given conflict.
pub(crate) fn foreign_key_violation_as(kind: ConflictKind) -> impl FnOnce(DbErr) -> DomainError {
    move |e| match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => DomainError::Conflict(kind),
        _ => db_err(e),
    }
}

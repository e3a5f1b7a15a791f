//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one data-access contract per entity family.
//! - Isolate SQLite query details from use-case orchestration.
//! - Translate storage failures into semantic errors (`NotFound`, `Conflict`).
//!
//! # Invariants
//! - Repositories borrow a connection or open transaction; they never begin,
//!   commit or roll back the caller's transaction.
//! - Every user-supplied value reaches SQL through bound parameters.
//! - Write paths validate entities before SQL mutations.

use crate::db::DbError;
use crate::model::id::TaggedId;
use crate::model::ValidationError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod author_repo;
pub mod book_repo;
pub mod book_tags_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Entity input rejected before reaching storage.
    Validation(ValidationError),
    /// Lookup by id or name matched no row.
    NotFound { entity: &'static str, key: String },
    /// Unique or foreign-key constraint violation.
    Conflict(String),
    /// Transport/engine failure.
    Db(DbError),
    /// Persisted row could not be mapped back to the domain model.
    InvalidData(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Conflict(details) => write!(f, "conflict: {details}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::Conflict(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps constraint violations raised by a write to `RepoError::Conflict`.
pub(crate) fn map_write_error(err: rusqlite::Error) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RepoError::Conflict(message.clone().unwrap_or_else(|| failure.to_string()))
        }
        _ => RepoError::from(err),
    }
}

/// Parses an id column value back into its tagged identifier.
pub(crate) fn parse_id<Tag>(value: &str, column: &str) -> RepoResult<TaggedId<Tag>> {
    Uuid::parse_str(value)
        .map(TaggedId::from_uuid)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

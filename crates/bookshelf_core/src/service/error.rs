//! Use-case error tagged with the failing operation.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Failure category a front-end can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Lookup by id or name matched nothing.
    NotFound,
    /// Unique name collision or missing referenced row.
    Conflict,
    /// Caller supplied empty or malformed input.
    Validation,
    /// Transaction, connectivity or data-integrity failure.
    Storage,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Storage => "storage",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed use case. Nothing it wrote was committed.
#[derive(Debug)]
pub struct UseCaseError {
    operation: &'static str,
    source: RepoError,
}

impl UseCaseError {
    pub fn new(operation: &'static str, source: impl Into<RepoError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    /// Name of the use case that failed, e.g. `add_author`.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.source {
            RepoError::Validation(_) => ErrorKind::Validation,
            RepoError::NotFound { .. } => ErrorKind::NotFound,
            RepoError::Conflict(_) => ErrorKind::Conflict,
            RepoError::Db(_) | RepoError::InvalidData(_) => ErrorKind::Storage,
        }
    }

    pub fn repo_error(&self) -> &RepoError {
        &self.source
    }

    pub fn into_repo_error(self) -> RepoError {
        self.source
    }
}

impl Display for UseCaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.source)
    }
}

impl Error for UseCaseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, UseCaseError};
    use crate::db::DbError;
    use crate::model::ValidationError;
    use crate::repo::RepoError;

    #[test]
    fn kind_follows_repository_error() {
        let cases = [
            (RepoError::not_found("author", "x"), ErrorKind::NotFound),
            (RepoError::Conflict("dup".to_string()), ErrorKind::Conflict),
            (
                RepoError::Validation(ValidationError::EmptyTag),
                ErrorKind::Validation,
            ),
            (
                RepoError::Db(DbError::UnsupportedSchemaVersion {
                    db_version: 9,
                    latest_supported: 1,
                }),
                ErrorKind::Storage,
            ),
            (RepoError::InvalidData("bad".to_string()), ErrorKind::Storage),
        ];

        for (source, expected) in cases {
            assert_eq!(UseCaseError::new("op", source).kind(), expected);
        }
    }

    #[test]
    fn display_names_the_operation() {
        let err = UseCaseError::new("edit_author_by_id", RepoError::not_found("author", "42"));
        assert_eq!(err.to_string(), "edit_author_by_id failed: author not found: 42");
    }
}

//! Persistence core for a small library catalog.
//! Authors, books and per-book tags behind repositories and a unit of work;
//! this crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod uow;

pub use config::LibraryConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::author::{Author, AuthorRecord};
pub use model::book::{Book, BookData, BookDetails, BookTags};
pub use model::id::{AuthorId, BookId, TaggedId};
pub use model::ValidationError;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::book_tags_repo::{BookTagsRepository, SqliteBookTagsRepository};
pub use repo::{RepoError, RepoResult};
pub use service::error::{ErrorKind, UseCaseError, UseCaseResult};
pub use service::library_service::LibraryService;
pub use service::use_cases::LibraryUseCases;
pub use uow::{SqliteUnitOfWork, SqliteUnitOfWorkFactory, UnitOfWork, UnitOfWorkFactory};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

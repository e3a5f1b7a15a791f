//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bookshelf_core` wiring against a real database file.
//! - Print catalog statistics in a stable `key=value` form.
//!
//! Configuration comes from `BOOKSHELF_*` environment variables.

use bookshelf_core::db::open_db_with_config;
use bookshelf_core::{
    core_version, init_logging_from_config, LibraryConfig, LibraryService, LibraryUseCases,
    SqliteUnitOfWorkFactory, UnitOfWorkFactory,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("bookshelf error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = LibraryConfig::from_env()?;
    init_logging_from_config(&config).map_err(|err| err.to_string())?;
    info!("event=cli_start module=cli status=ok");

    let conn = open_db_with_config(&config).map_err(|err| err.to_string())?;
    let (author_count, book_count) = catalog_counts(SqliteUnitOfWorkFactory::new(conn))?;

    println!("bookshelf_core version={}", core_version());
    println!("bookshelf db_path={}", config.db_path.display());
    println!("bookshelf authors={author_count} books={book_count}");
    Ok(())
}

/// Returns `(authors, books)` stored behind `factory`.
fn catalog_counts(mut factory: SqliteUnitOfWorkFactory) -> Result<(usize, u64), String> {
    let unit = factory
        .create_unit_of_work()
        .map_err(|err| err.to_string())?;
    let book_count = unit.books().count().map_err(|err| err.to_string())?;
    drop(unit);

    let mut service = LibraryService::new(factory);
    let authors = service.show_authors().map_err(|err| err.to_string())?;
    Ok((authors.len(), book_count))
}

#[cfg(test)]
mod tests {
    use super::catalog_counts;
    use bookshelf_core::db::open_db_in_memory;
    use bookshelf_core::{LibraryService, LibraryUseCases, SqliteUnitOfWorkFactory};

    #[test]
    fn counts_empty_catalog() {
        let factory = SqliteUnitOfWorkFactory::new(open_db_in_memory().unwrap());
        assert_eq!(catalog_counts(factory).unwrap(), (0, 0));
    }

    #[test]
    fn counts_authors_and_books() {
        let mut service =
            LibraryService::new(SqliteUnitOfWorkFactory::new(open_db_in_memory().unwrap()));
        let author_id = service.add_author("Mary Shelley").unwrap();
        service.add_book(author_id, "Frankenstein", 1818).unwrap();
        service.add_book(author_id, "The Last Man", 1826).unwrap();
        service.add_author("Bram Stoker").unwrap();

        assert_eq!(catalog_counts(service.into_factory()).unwrap(), (2, 2));
    }
}

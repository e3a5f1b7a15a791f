//! Library use-case service.
//!
//! # Responsibility
//! - Run each catalog use case inside one fresh unit of work.
//! - Own cascading deletes across authors, books and tags.
//! - Map repository failures to `UseCaseError` tagged with the operation.
//!
//! # Invariants
//! - A use case commits only when every repository call succeeded; on any
//!   failure the unit of work is dropped and its writes are rolled back.
//! - Failure logs carry the operation and error kind only, never user text.

use crate::model::author::{Author, AuthorRecord};
use crate::model::book::{Book, BookData, BookDetails, BookTags};
use crate::model::id::{AuthorId, BookId};
use crate::repo::{RepoError, RepoResult};
use crate::service::error::{UseCaseError, UseCaseResult};
use crate::service::use_cases::LibraryUseCases;
use crate::uow::{UnitOfWork, UnitOfWorkFactory};
use log::{debug, warn};
use std::time::Instant;

/// Use-case service over a unit-of-work factory.
pub struct LibraryService<F: UnitOfWorkFactory> {
    factory: F,
}

impl<F: UnitOfWorkFactory> LibraryService<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn into_factory(self) -> F {
        self.factory
    }

    /// Runs `work` in a fresh unit of work, committing only on success.
    fn run<T>(
        &mut self,
        operation: &'static str,
        work: impl FnOnce(&dyn UnitOfWork) -> RepoResult<T>,
    ) -> UseCaseResult<T> {
        let started_at = Instant::now();
        let result = self
            .factory
            .create_unit_of_work()
            .and_then(|unit| match work(unit.as_ref()) {
                Ok(value) => unit.commit().map(|()| value),
                // Dropping the unit rolls the transaction back.
                Err(err) => Err(err),
            });

        match result {
            Ok(value) => {
                debug!(
                    "event=use_case module=service op={operation} status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                let err = UseCaseError::new(operation, err);
                warn!(
                    "event=use_case module=service op={operation} status=rolled_back error_kind={} duration_ms={}",
                    err.kind(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

impl<F: UnitOfWorkFactory> LibraryUseCases for LibraryService<F> {
    fn add_author(&mut self, name: &str) -> UseCaseResult<AuthorId> {
        let author = Author::new(name);
        self.run("add_author", |unit| {
            unit.authors().save(&author)?;
            Ok(author.id())
        })
    }

    fn show_authors(&mut self) -> UseCaseResult<Vec<AuthorRecord>> {
        self.run("show_authors", |unit| unit.authors().read())
    }

    fn delete_author_by_name(&mut self, name: &str) -> UseCaseResult<()> {
        self.run("delete_author_by_name", |unit| {
            let author = unit
                .authors()
                .find_by_name(name)?
                .ok_or_else(|| RepoError::not_found("author", name))?;
            delete_author_cascade(unit, &author)
        })
    }

    fn delete_author_by_id(&mut self, id: AuthorId) -> UseCaseResult<()> {
        self.run("delete_author_by_id", |unit| {
            let author = unit
                .authors()
                .find_by_id(id)?
                .ok_or_else(|| RepoError::not_found("author", id))?;
            delete_author_cascade(unit, &author)
        })
    }

    fn edit_author_by_name(&mut self, old_name: &str, new_name: &str) -> UseCaseResult<()> {
        self.run("edit_author_by_name", |unit| {
            unit.authors().edit_by_name(old_name, new_name)
        })
    }

    fn edit_author_by_id(&mut self, id: AuthorId, new_name: &str) -> UseCaseResult<()> {
        self.run("edit_author_by_id", |unit| {
            unit.authors().edit_by_id(id, new_name)
        })
    }

    fn add_book(&mut self, author_id: AuthorId, title: &str, year: i32) -> UseCaseResult<BookId> {
        let book = Book::new(author_id, title, year);
        self.run("add_book", |unit| {
            unit.books().save(&book)?;
            Ok(book.id())
        })
    }

    fn add_book_tags(&mut self, book_id: BookId, tags: Vec<String>) -> UseCaseResult<()> {
        let book_tags = BookTags::new(book_id, tags);
        self.run("add_book_tags", |unit| {
            book_tags.validate()?;
            require_book(unit, book_id)?;

            let repo = unit.book_tags();
            let existing = repo.read_by_id(book_id)?;
            if existing.is_empty() {
                return repo.save(&book_tags);
            }
            // Stored tags plus the new ones, deduplicated.
            let merged = BookTags::new(book_id, existing.iter().chain(book_tags.tags()));
            repo.update(&merged)
        })
    }

    fn show_books(&mut self) -> UseCaseResult<Vec<BookData>> {
        self.run("show_books", |unit| unit.books().read())
    }

    fn show_books_by_title(&mut self, title: &str) -> UseCaseResult<Vec<BookData>> {
        self.run("show_books_by_title", |unit| {
            unit.books().read_by_title(title)
        })
    }

    fn show_book_by_id(&mut self, book_id: BookId) -> UseCaseResult<BookDetails> {
        self.run("show_book_by_id", |unit| {
            let book = unit
                .books()
                .read_by_id(book_id)?
                .ok_or_else(|| RepoError::not_found("book", book_id))?;
            let tags = unit.book_tags().read_by_id(book_id)?;
            Ok(BookDetails {
                title: book.title,
                author_name: book.author_name.unwrap_or_default(),
                publication_year: book.year,
                tags,
            })
        })
    }

    fn show_author_books(&mut self, author_id: AuthorId) -> UseCaseResult<Vec<BookData>> {
        self.run("show_author_books", |unit| {
            unit.books().read_author_books(author_id)
        })
    }

    fn delete_book_by_name(&mut self, title: &str) -> UseCaseResult<()> {
        self.run("delete_book_by_name", |unit| {
            let books = unit.books();
            let matching = books.read_by_title(title)?;
            if matching.is_empty() {
                return Err(RepoError::not_found("book", title));
            }

            let book_tags = unit.book_tags();
            for book in &matching {
                book_tags.delete_by_id(book.id)?;
            }
            books.delete_by_title(title)
        })
    }

    fn delete_book_by_id(&mut self, book_id: BookId) -> UseCaseResult<()> {
        self.run("delete_book_by_id", |unit| {
            unit.book_tags().delete_by_id(book_id)?;
            unit.books().delete_by_id(book_id)
        })
    }

    fn edit_book_title_by_id(&mut self, book_id: BookId, new_title: &str) -> UseCaseResult<()> {
        self.run("edit_book_title_by_id", |unit| {
            unit.books().edit_title_by_id(book_id, new_title)
        })
    }

    fn edit_book_year_by_id(&mut self, book_id: BookId, new_year: i32) -> UseCaseResult<()> {
        self.run("edit_book_year_by_id", |unit| {
            unit.books().edit_year_by_id(book_id, new_year)
        })
    }

    fn get_book_tags_by_id(&mut self, book_id: BookId) -> UseCaseResult<Vec<String>> {
        self.run("get_book_tags_by_id", |unit| {
            unit.book_tags().read_by_id(book_id)
        })
    }

    fn delete_book_tags_by_id(&mut self, book_id: BookId) -> UseCaseResult<()> {
        self.run("delete_book_tags_by_id", |unit| {
            require_book(unit, book_id)?;
            unit.book_tags().delete_by_id(book_id)
        })
    }

    fn edit_book_tags_by_id(
        &mut self,
        book_id: BookId,
        new_tags: Vec<String>,
    ) -> UseCaseResult<()> {
        let book_tags = BookTags::new(book_id, new_tags);
        self.run("edit_book_tags_by_id", |unit| {
            book_tags.validate()?;
            require_book(unit, book_id)?;
            unit.book_tags().update(&book_tags)
        })
    }
}

/// Fails with `NotFound` unless `book_id` names a stored book.
fn require_book(unit: &dyn UnitOfWork, book_id: BookId) -> RepoResult<()> {
    let book = unit.books().read_by_id(book_id)?;
    match book {
        Some(_) => Ok(()),
        None => Err(RepoError::not_found("book", book_id)),
    }
}

/// Deletes every book of `author` with its tags, then the author row.
fn delete_author_cascade(unit: &dyn UnitOfWork, author: &Author) -> RepoResult<()> {
    let books = unit.books();
    let book_tags = unit.book_tags();
    for book in books.read_author_books(author.id())? {
        book_tags.delete_by_id(book.id)?;
        books.delete_by_id(book.id)?;
    }
    unit.authors().delete_by_id(author.id())
}

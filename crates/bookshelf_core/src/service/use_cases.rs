//! Use-case call contract consumed by front-ends.
//!
//! Identifier-based operations take resolved ids; turning a human-entered
//! name into an id is the front-end's job.

use crate::model::author::AuthorRecord;
use crate::model::book::{BookData, BookDetails};
use crate::model::id::{AuthorId, BookId};
use crate::service::error::UseCaseResult;

/// One method per catalog business action.
///
/// Every call runs in its own unit of work and either commits fully or
/// leaves storage untouched.
pub trait LibraryUseCases {
    fn add_author(&mut self, name: &str) -> UseCaseResult<AuthorId>;
    /// Authors ordered by name.
    fn show_authors(&mut self) -> UseCaseResult<Vec<AuthorRecord>>;
    /// Deletes the author, its books and their tags.
    fn delete_author_by_name(&mut self, name: &str) -> UseCaseResult<()>;
    /// Deletes the author, its books and their tags.
    fn delete_author_by_id(&mut self, id: AuthorId) -> UseCaseResult<()>;
    fn edit_author_by_name(&mut self, old_name: &str, new_name: &str) -> UseCaseResult<()>;
    fn edit_author_by_id(&mut self, id: AuthorId, new_name: &str) -> UseCaseResult<()>;

    fn add_book(&mut self, author_id: AuthorId, title: &str, year: i32) -> UseCaseResult<BookId>;
    /// Adds `tags` to the book's stored set; tags already present are kept once.
    fn add_book_tags(&mut self, book_id: BookId, tags: Vec<String>) -> UseCaseResult<()>;
    /// Books ordered by title, author name and year.
    fn show_books(&mut self) -> UseCaseResult<Vec<BookData>>;
    fn show_books_by_title(&mut self, title: &str) -> UseCaseResult<Vec<BookData>>;
    fn show_book_by_id(&mut self, book_id: BookId) -> UseCaseResult<BookDetails>;
    /// Books of one author ordered by year and title, without author names.
    fn show_author_books(&mut self, author_id: AuthorId) -> UseCaseResult<Vec<BookData>>;
    /// Deletes every book titled `title` together with its tags.
    fn delete_book_by_name(&mut self, title: &str) -> UseCaseResult<()>;
    /// Deletes the book together with its tags.
    fn delete_book_by_id(&mut self, book_id: BookId) -> UseCaseResult<()>;
    fn edit_book_title_by_id(&mut self, book_id: BookId, new_title: &str) -> UseCaseResult<()>;
    fn edit_book_year_by_id(&mut self, book_id: BookId, new_year: i32) -> UseCaseResult<()>;

    /// Tags of one book in ascending order; empty when it has none.
    fn get_book_tags_by_id(&mut self, book_id: BookId) -> UseCaseResult<Vec<String>>;
    fn delete_book_tags_by_id(&mut self, book_id: BookId) -> UseCaseResult<()>;
    /// Replaces the whole tag set; the old tags are not merged in.
    fn edit_book_tags_by_id(&mut self, book_id: BookId, new_tags: Vec<String>)
        -> UseCaseResult<()>;
}

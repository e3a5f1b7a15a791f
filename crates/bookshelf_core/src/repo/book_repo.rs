//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist books and serve the joined listing projections.
//!
//! # Invariants
//! - Listings joined with authors are ordered by `(title, author name, year)`.
//! - Per-author listings are ordered by `(year, title)` and skip the join, so
//!   `BookData::author_name` is `None` there.
//! - Deletes never touch `book_tags`; the caller removes tag rows first.

use crate::model::book::{validate_book_title, Book, BookData};
use crate::model::id::{AuthorId, BookId};
use crate::repo::{map_write_error, parse_id, RepoError, RepoResult};
use rusqlite::{params, Connection, Params, Row};

const BOOK_JOINED_SELECT_SQL: &str = "SELECT
    books.id AS id,
    books.author_id AS author_id,
    authors.name AS author_name,
    books.title AS title,
    books.publication_year AS publication_year
FROM books
INNER JOIN authors ON authors.id = books.author_id";

const BOOK_JOINED_ORDER_SQL: &str =
    "ORDER BY books.title ASC, authors.name ASC, books.publication_year ASC, books.id ASC";

/// Repository interface for books.
pub trait BookRepository {
    /// Inserts a new book. Unknown `author_id` yields `Conflict`.
    fn save(&self, book: &Book) -> RepoResult<()>;
    fn read(&self) -> RepoResult<Vec<BookData>>;
    /// Books whose title matches `title` exactly.
    fn read_by_title(&self, title: &str) -> RepoResult<Vec<BookData>>;
    fn read_by_id(&self, id: BookId) -> RepoResult<Option<BookData>>;
    fn read_author_books(&self, author_id: AuthorId) -> RepoResult<Vec<BookData>>;
    /// Deletes every book titled `title`.
    fn delete_by_title(&self, title: &str) -> RepoResult<()>;
    fn delete_by_id(&self, id: BookId) -> RepoResult<()>;
    fn edit_title_by_id(&self, id: BookId, new_title: &str) -> RepoResult<()>;
    fn edit_year_by_id(&self, id: BookId, new_year: i32) -> RepoResult<()>;
    /// Number of stored books.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_books<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<BookData>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn save(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        self.conn
            .execute(
                "INSERT INTO books (id, author_id, title, publication_year)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    book.id().to_string(),
                    book.author_id().to_string(),
                    book.title(),
                    book.year(),
                ],
            )
            .map_err(map_write_error)?;
        Ok(())
    }

    fn read(&self) -> RepoResult<Vec<BookData>> {
        self.query_books(
            &format!("{BOOK_JOINED_SELECT_SQL} {BOOK_JOINED_ORDER_SQL};"),
            [],
        )
    }

    fn read_by_title(&self, title: &str) -> RepoResult<Vec<BookData>> {
        self.query_books(
            &format!("{BOOK_JOINED_SELECT_SQL} WHERE books.title = ?1 {BOOK_JOINED_ORDER_SQL};"),
            [title],
        )
    }

    fn read_by_id(&self, id: BookId) -> RepoResult<Option<BookData>> {
        let mut books = self.query_books(
            &format!("{BOOK_JOINED_SELECT_SQL} WHERE books.id = ?1;"),
            [id.to_string()],
        )?;
        Ok(books.pop())
    }

    fn read_author_books(&self, author_id: AuthorId) -> RepoResult<Vec<BookData>> {
        self.query_books(
            "SELECT
                id,
                author_id,
                NULL AS author_name,
                title,
                publication_year
             FROM books
             WHERE author_id = ?1
             ORDER BY publication_year ASC, title ASC, id ASC;",
            [author_id.to_string()],
        )
    }

    fn delete_by_title(&self, title: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE title = ?1;", [title])
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::not_found("book", title));
        }
        Ok(())
    }

    fn delete_by_id(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id.to_string()])
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::not_found("book", id));
        }
        Ok(())
    }

    fn edit_title_by_id(&self, id: BookId, new_title: &str) -> RepoResult<()> {
        validate_book_title(new_title)?;

        let changed = self.conn.execute(
            "UPDATE books SET title = ?2 WHERE id = ?1;",
            params![id.to_string(), new_title],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("book", id));
        }
        Ok(())
    }

    fn edit_year_by_id(&self, id: BookId, new_year: i32) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books SET publication_year = ?2 WHERE id = ?1;",
            params![id.to_string(), new_year],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("book", id));
        }
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative book count `{count}`")))
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<BookData> {
    let id_text: String = row.get("id")?;
    let author_id_text: String = row.get("author_id")?;

    Ok(BookData {
        id: parse_id(&id_text, "books.id")?,
        author_id: parse_id(&author_id_text, "books.author_id")?,
        author_name: row.get("author_name")?,
        title: row.get("title")?,
        // Nullable in the schema; rows written by this crate always carry a year.
        year: row.get::<_, Option<i32>>("publication_year")?.unwrap_or(0),
    })
}

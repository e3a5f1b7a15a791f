//! Book-tag repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Store each tag of a book as one `book_tags` row.
//! - Own whole-set replacement (`update`) with delete-then-insert semantics.
//!
//! # Invariants
//! - `save` appends rows and does not deduplicate against existing rows.
//! - `update` never merges: after it returns, the stored set equals the input.
//! - Tags of one book are returned in ascending text order.

use crate::model::book::BookTags;
use crate::model::id::BookId;
use crate::repo::{map_write_error, parse_id, RepoResult};
use log::warn;
use rusqlite::{params, Connection};

/// Repository interface for per-book tag sets.
pub trait BookTagsRepository {
    fn save(&self, book_tags: &BookTags) -> RepoResult<()>;
    /// Every `(book_id, tag)` pair in storage.
    fn read(&self) -> RepoResult<Vec<(BookId, String)>>;
    fn read_by_id(&self, book_id: BookId) -> RepoResult<Vec<String>>;
    /// Replaces the full tag set of `book_tags.book_id()`.
    fn update(&self, book_tags: &BookTags) -> RepoResult<()>;
    /// Removes all tags of one book. Succeeds when there is nothing to remove.
    fn delete_by_id(&self, book_id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book-tag repository.
pub struct SqliteBookTagsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookTagsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert_tags(&self, book_tags: &BookTags) -> RepoResult<()> {
        let book_id = book_tags.book_id().to_string();
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO book_tags (book_id, tag) VALUES (?1, ?2);")?;
        for tag in book_tags.tags() {
            stmt.execute(params![book_id.as_str(), tag.as_str()])
                .map_err(map_write_error)?;
        }
        Ok(())
    }

    fn replace_tags(&self, book_tags: &BookTags) -> RepoResult<()> {
        self.delete_by_id(book_tags.book_id())?;
        self.insert_tags(book_tags)
    }
}

impl BookTagsRepository for SqliteBookTagsRepository<'_> {
    fn save(&self, book_tags: &BookTags) -> RepoResult<()> {
        book_tags.validate()?;
        self.insert_tags(book_tags)
    }

    fn read(&self) -> RepoResult<Vec<(BookId, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT book_id, tag FROM book_tags ORDER BY book_id ASC, tag ASC;")?;
        let mut rows = stmt.query([])?;
        let mut pairs = Vec::new();
        while let Some(row) = rows.next()? {
            let book_id_text: String = row.get("book_id")?;
            pairs.push((
                parse_id(&book_id_text, "book_tags.book_id")?,
                row.get::<_, String>("tag")?,
            ));
        }
        Ok(pairs)
    }

    fn read_by_id(&self, book_id: BookId) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT tag FROM book_tags WHERE book_id = ?1 ORDER BY tag ASC;")?;
        let mut rows = stmt.query([book_id.to_string()])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(row.get::<_, String>(0)?);
        }
        Ok(tags)
    }

    fn update(&self, book_tags: &BookTags) -> RepoResult<()> {
        book_tags.validate()?;

        // Nested under the caller's transaction when there is one.
        self.conn.execute_batch("SAVEPOINT book_tags_update;")?;
        match self.replace_tags(book_tags) {
            Ok(()) => {
                self.conn.execute_batch("RELEASE book_tags_update;")?;
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = self
                    .conn
                    .execute_batch("ROLLBACK TO book_tags_update; RELEASE book_tags_update;")
                {
                    warn!(
                        "event=book_tags_update module=repo status=error error_code=savepoint_rollback_failed error={}",
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    fn delete_by_id(&self, book_id: BookId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM book_tags WHERE book_id = ?1;",
            [book_id.to_string()],
        )?;
        Ok(())
    }
}

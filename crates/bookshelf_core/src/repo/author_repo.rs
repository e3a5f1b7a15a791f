//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - `save` is an upsert keyed by id; a name already used by another author
//!   is reported as `Conflict`.
//! - Deleting an author removes only the `authors` row. Books still
//!   referencing it make the delete fail with `Conflict`.

use crate::model::author::{validate_author_name, Author, AuthorRecord};
use crate::model::id::AuthorId;
use crate::repo::{map_write_error, parse_id, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for authors.
pub trait AuthorRepository {
    /// Inserts the author or renames the existing row with the same id.
    fn save(&self, author: &Author) -> RepoResult<()>;
    /// Lists every author ordered by name.
    fn read(&self) -> RepoResult<Vec<AuthorRecord>>;
    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    fn delete_by_name(&self, name: &str) -> RepoResult<()>;
    fn delete_by_id(&self, id: AuthorId) -> RepoResult<()>;
    fn edit_by_name(&self, old_name: &str, new_name: &str) -> RepoResult<()>;
    fn edit_by_id(&self, id: AuthorId, new_name: &str) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find_one(&self, sql: &str, key: &str) -> RepoResult<Option<Author>> {
        let found = self
            .conn
            .query_row(sql, [key], |row| {
                Ok((row.get::<_, String>("id")?, row.get::<_, String>("name")?))
            })
            .optional()?;

        match found {
            Some((id_text, name)) => Ok(Some(Author::with_id(
                parse_id(&id_text, "authors.id")?,
                name,
            ))),
            None => Ok(None),
        }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn save(&self, author: &Author) -> RepoResult<()> {
        author.validate()?;

        self.conn
            .execute(
                "INSERT INTO authors (id, name) VALUES (?1, ?2)
                 ON CONFLICT (id) DO UPDATE SET name = excluded.name;",
                params![author.id().to_string(), author.name()],
            )
            .map_err(map_write_error)?;
        Ok(())
    }

    fn read(&self) -> RepoResult<Vec<AuthorRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM authors ORDER BY name ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            let author = parse_author_row(row)?;
            authors.push(AuthorRecord {
                id: author.id(),
                name: author.name().to_string(),
            });
        }
        Ok(authors)
    }

    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.find_one("SELECT id, name FROM authors WHERE id = ?1;", &id.to_string())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.find_one("SELECT id, name FROM authors WHERE name = ?1;", name)
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE name = ?1;", [name])
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::not_found("author", name));
        }
        Ok(())
    }

    fn delete_by_id(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id.to_string()])
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::not_found("author", id));
        }
        Ok(())
    }

    fn edit_by_name(&self, old_name: &str, new_name: &str) -> RepoResult<()> {
        validate_author_name(new_name)?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors SET name = ?2 WHERE name = ?1;",
                params![old_name, new_name],
            )
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::not_found("author", old_name));
        }
        Ok(())
    }

    fn edit_by_id(&self, id: AuthorId, new_name: &str) -> RepoResult<()> {
        validate_author_name(new_name)?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors SET name = ?2 WHERE id = ?1;",
                params![id.to_string(), new_name],
            )
            .map_err(map_write_error)?;
        if changed == 0 {
            return Err(RepoError::not_found("author", id));
        }
        Ok(())
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id_text: String = row.get("id")?;
    let id = parse_id(&id_text, "authors.id")?;
    Ok(Author::with_id(id, row.get::<_, String>("name")?))
}

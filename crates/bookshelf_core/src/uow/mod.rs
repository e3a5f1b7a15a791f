//! Unit of work: one transaction shared by a matched set of repositories.
//!
//! # Responsibility
//! - Bind author, book and book-tag repositories to one open transaction.
//! - Commit all writes issued through those repositories as a whole.
//! - Hand out a fresh unit per use-case call through a factory.
//!
//! # Invariants
//! - A unit of work owns exactly one transaction for its whole lifetime.
//! - Dropping a unit without `commit` rolls every write back.
//! - Every unit begins `IMMEDIATE`, read-only use cases included, and holds
//!   the database write lock until it commits or is dropped.
//! - The factory keeps at most one unit alive at a time (`&mut self`).

use crate::repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
use crate::repo::book_repo::{BookRepository, SqliteBookRepository};
use crate::repo::book_tags_repo::{BookTagsRepository, SqliteBookTagsRepository};
use crate::repo::RepoResult;
use log::debug;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Transaction scope handed to one use-case invocation.
pub trait UnitOfWork {
    /// Author repository bound to this unit's transaction.
    fn authors(&self) -> Box<dyn AuthorRepository + '_>;
    /// Book repository bound to this unit's transaction.
    fn books(&self) -> Box<dyn BookRepository + '_>;
    /// Book-tag repository bound to this unit's transaction.
    fn book_tags(&self) -> Box<dyn BookTagsRepository + '_>;
    /// Durably applies every write issued through this unit.
    fn commit(self: Box<Self>) -> RepoResult<()>;
}

/// Creates one unit of work per call.
pub trait UnitOfWorkFactory {
    fn create_unit_of_work(&mut self) -> RepoResult<Box<dyn UnitOfWork + '_>>;
}

/// SQLite unit of work over an `IMMEDIATE` transaction.
pub struct SqliteUnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteUnitOfWork<'conn> {
    /// Begins a write transaction on `conn`, taking the write lock at once.
    pub fn begin(conn: &'conn mut Connection) -> RepoResult<Self> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        debug!("event=uow_begin module=uow status=ok");
        Ok(Self { tx })
    }
}

impl UnitOfWork for SqliteUnitOfWork<'_> {
    fn authors(&self) -> Box<dyn AuthorRepository + '_> {
        Box::new(SqliteAuthorRepository::new(&self.tx))
    }

    fn books(&self) -> Box<dyn BookRepository + '_> {
        Box::new(SqliteBookRepository::new(&self.tx))
    }

    fn book_tags(&self) -> Box<dyn BookTagsRepository + '_> {
        Box::new(SqliteBookTagsRepository::new(&self.tx))
    }

    fn commit(self: Box<Self>) -> RepoResult<()> {
        let unit = *self;
        unit.tx.commit()?;
        debug!("event=uow_commit module=uow status=ok");
        Ok(())
    }
}

/// Factory owning the SQLite connection all units of work run on.
pub struct SqliteUnitOfWorkFactory {
    conn: Connection,
}

impl SqliteUnitOfWorkFactory {
    /// Wraps a migrated connection, e.g. from `db::open_db`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Read access to the underlying connection outside any unit of work.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl UnitOfWorkFactory for SqliteUnitOfWorkFactory {
    fn create_unit_of_work(&mut self) -> RepoResult<Box<dyn UnitOfWork + '_>> {
        Ok(Box::new(SqliteUnitOfWork::begin(&mut self.conn)?))
    }
}

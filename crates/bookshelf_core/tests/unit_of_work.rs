use bookshelf_core::db::{open_db, open_db_in_memory};
use bookshelf_core::{Author, Book, BookTags, SqliteUnitOfWorkFactory, UnitOfWorkFactory};
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn commit_applies_writes_from_all_repositories() {
    let mut factory = SqliteUnitOfWorkFactory::new(open_db_in_memory().unwrap());
    let author = Author::new("Mary Shelley");
    let book = Book::new(author.id(), "Frankenstein", 1818);

    let unit = factory.create_unit_of_work().unwrap();
    unit.authors().save(&author).unwrap();
    unit.books().save(&book).unwrap();
    unit.book_tags()
        .save(&BookTags::new(book.id(), ["gothic"]))
        .unwrap();
    unit.commit().unwrap();

    let unit = factory.create_unit_of_work().unwrap();
    assert_eq!(unit.authors().read().unwrap().len(), 1);
    assert_eq!(unit.books().count().unwrap(), 1);
    assert_eq!(unit.book_tags().read_by_id(book.id()).unwrap(), ["gothic"]);
}

#[test]
fn dropping_without_commit_discards_writes() {
    let mut factory = SqliteUnitOfWorkFactory::new(open_db_in_memory().unwrap());

    {
        let unit = factory.create_unit_of_work().unwrap();
        unit.authors().save(&Author::new("Bram Stoker")).unwrap();
    }

    let author_rows: i64 = factory
        .connection()
        .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(author_rows, 0);
}

#[test]
fn repository_handles_share_the_transaction() {
    let mut factory = SqliteUnitOfWorkFactory::new(open_db_in_memory().unwrap());
    let author = Author::new("Edgar Allan Poe");

    let unit = factory.create_unit_of_work().unwrap();
    unit.authors().save(&author).unwrap();

    // A second handle sees the uncommitted row, and the book's foreign key
    // check passes against it.
    let listed = unit.authors().read().unwrap();
    assert_eq!(listed.len(), 1);
    unit.books()
        .save(&Book::new(author.id(), "The Raven", 1845))
        .unwrap();
    unit.commit().unwrap();

    let unit = factory.create_unit_of_work().unwrap();
    assert_eq!(unit.books().count().unwrap(), 1);
}

#[test]
fn units_of_work_are_created_fresh_per_call() {
    let mut factory = SqliteUnitOfWorkFactory::new(open_db_in_memory().unwrap());

    let first = factory.create_unit_of_work().unwrap();
    first.authors().save(&Author::new("Kept")).unwrap();
    first.commit().unwrap();

    let second = factory.create_unit_of_work().unwrap();
    second.authors().save(&Author::new("Discarded")).unwrap();
    drop(second);

    let conn = factory.into_inner();
    let names: Vec<String> = conn
        .prepare("SELECT name FROM authors ORDER BY name;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names, ["Kept"]);
}

#[test]
fn read_only_unit_holds_the_write_lock_until_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locks.db");
    let mut factory = SqliteUnitOfWorkFactory::new(open_db(&path).unwrap());
    let other = Connection::open(&path).unwrap();
    other.busy_timeout(Duration::ZERO).unwrap();

    let unit = factory.create_unit_of_work().unwrap();
    assert!(unit.authors().read().unwrap().is_empty());
    assert!(other.execute_batch("BEGIN IMMEDIATE;").is_err());
    drop(unit);

    other.execute_batch("BEGIN IMMEDIATE; ROLLBACK;").unwrap();
}

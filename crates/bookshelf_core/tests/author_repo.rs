use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Author, AuthorId, AuthorRepository, Book, BookRepository, RepoError, SqliteAuthorRepository,
    SqliteBookRepository, ValidationError,
};

#[test]
fn save_and_read_orders_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let tolkien = Author::new("J. R. R. Tolkien");
    let austen = Author::new("Jane Austen");
    repo.save(&tolkien).unwrap();
    repo.save(&austen).unwrap();

    let listed = repo.read().unwrap();
    let names: Vec<&str> = listed.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, ["J. R. R. Tolkien", "Jane Austen"]);
    assert_eq!(listed[1].id, austen.id());
}

#[test]
fn save_upserts_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let author = Author::new("Joanne Rowling");
    repo.save(&author).unwrap();
    repo.save(&author.renamed("J. K. Rowling")).unwrap();

    let listed = repo.read().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "J. K. Rowling");
}

#[test]
fn save_duplicate_name_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    repo.save(&Author::new("Leo Tolstoy")).unwrap();
    let err = repo.save(&Author::new("Leo Tolstoy")).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[test]
fn save_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let err = repo.save(&Author::new("  ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyAuthorName)
    ));
}

#[test]
fn name_with_quotes_is_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let tricky = Author::new("O'Brien'); DROP TABLE authors; --");
    repo.save(&tricky).unwrap();

    let found = repo.find_by_name(tricky.name()).unwrap().unwrap();
    assert_eq!(found, tricky);
    repo.delete_by_name(tricky.name()).unwrap();
    assert!(repo.read().unwrap().is_empty());
}

#[test]
fn find_by_id_and_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let author = Author::new("Ursula K. Le Guin");
    repo.save(&author).unwrap();

    assert_eq!(repo.find_by_id(author.id()).unwrap(), Some(author.clone()));
    assert_eq!(
        repo.find_by_name("Ursula K. Le Guin").unwrap(),
        Some(author)
    );
    assert_eq!(repo.find_by_id(AuthorId::new()).unwrap(), None);
    assert_eq!(repo.find_by_name("Nobody").unwrap(), None);
}

#[test]
fn edit_by_id_and_name_rename() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let author = Author::new("Mark Twain");
    repo.save(&author).unwrap();

    repo.edit_by_name("Mark Twain", "Samuel Clemens").unwrap();
    assert_eq!(
        repo.find_by_id(author.id()).unwrap().unwrap().name(),
        "Samuel Clemens"
    );

    repo.edit_by_id(author.id(), "Mark Twain").unwrap();
    assert_eq!(
        repo.find_by_id(author.id()).unwrap().unwrap().name(),
        "Mark Twain"
    );
}

#[test]
fn edit_missing_author_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let err = repo.edit_by_id(AuthorId::new(), "Anyone").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", .. }));

    let err = repo.edit_by_name("Ghost", "Anyone").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", .. }));
}

#[test]
fn edit_into_existing_name_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let first = Author::new("Isaac Asimov");
    repo.save(&first).unwrap();
    repo.save(&Author::new("Arthur C. Clarke")).unwrap();

    let err = repo.edit_by_id(first.id(), "Arthur C. Clarke").unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[test]
fn delete_missing_author_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    assert!(matches!(
        repo.delete_by_id(AuthorId::new()).unwrap_err(),
        RepoError::NotFound { .. }
    ));
    assert!(matches!(
        repo.delete_by_name("Ghost").unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn delete_author_with_books_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&conn);
    let books = SqliteBookRepository::new(&conn);

    let author = Author::new("Frank Herbert");
    authors.save(&author).unwrap();
    books.save(&Book::new(author.id(), "Dune", 1965)).unwrap();

    let err = authors.delete_by_id(author.id()).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    assert!(authors.find_by_id(author.id()).unwrap().is_some());
}

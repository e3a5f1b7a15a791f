//! Book and book-tag domain models.
//!
//! # Responsibility
//! - Define the `Book` value record and its read projections.
//! - Define `BookTags`, the per-book tag set, and its normalization rules.
//!
//! # Invariants
//! - `Book::author_id` must reference a live author when the book is saved.
//! - `BookTags::tags` never contains duplicates after construction.
//! - Tag text is trimmed and inner whitespace runs collapse to one space.

use crate::model::id::{AuthorId, BookId};
use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Catalog book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    author_id: AuthorId,
    title: String,
    year: i32,
}

impl Book {
    /// Creates a new book with a generated id.
    pub fn new(author_id: AuthorId, title: impl Into<String>, year: i32) -> Self {
        Self::with_id(BookId::new(), author_id, title, year)
    }

    pub fn with_id(id: BookId, author_id: AuthorId, title: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            author_id,
            title: title.into(),
            year,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication year. No range check is applied.
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_book_title(&self.title)
    }
}

/// Book listing row joined with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    pub id: BookId,
    pub author_id: AuthorId,
    /// `None` when read through the per-author listing, which skips the join.
    pub author_name: Option<String>,
    pub title: String,
    pub year: i32,
}

/// Detail view of one book including its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub title: String,
    pub author_name: String,
    pub publication_year: i32,
    pub tags: Vec<String>,
}

/// Full tag set of one book.
///
/// Persisted and replaced as a whole; there is no per-tag identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTags {
    book_id: BookId,
    tags: Vec<String>,
}

impl BookTags {
    /// Builds a tag set, normalizing and deduplicating `tags`.
    ///
    /// Blank entries survive as `""` so `validate()` can reject them.
    pub fn new<I, S>(book_id: BookId, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = tags
            .into_iter()
            .map(|tag| normalize_tag(tag.as_ref()))
            .collect();
        Self {
            book_id,
            tags: unique.into_iter().collect(),
        }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    /// Tags in ascending order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tags.iter().any(|tag| tag.is_empty()) {
            return Err(ValidationError::EmptyTag);
        }
        Ok(())
    }
}

/// Rejects empty or whitespace-only titles.
pub fn validate_book_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyBookTitle);
    }
    Ok(())
}

/// Trims one tag and collapses inner whitespace runs.
pub fn normalize_tag(tag: &str) -> String {
    WHITESPACE_RE.replace_all(tag.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{normalize_tag, BookTags};
    use crate::model::id::BookId;
    use crate::model::ValidationError;

    #[test]
    fn normalize_tag_collapses_whitespace() {
        assert_eq!(normalize_tag("  science   fiction \t"), "science fiction");
    }

    #[test]
    fn book_tags_drop_duplicates_after_normalization() {
        let tags = BookTags::new(BookId::new(), ["ya", " fantasy", "fantasy ", "ya"]);
        assert_eq!(tags.tags(), ["fantasy".to_string(), "ya".to_string()]);
    }

    #[test]
    fn book_tags_with_blank_entry_fail_validation() {
        let tags = BookTags::new(BookId::new(), ["classic", "   "]);
        assert_eq!(tags.validate(), Err(ValidationError::EmptyTag));
    }
}

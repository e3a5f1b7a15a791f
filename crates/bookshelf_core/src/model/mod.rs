//! Domain model for the library catalog.
//!
//! # Responsibility
//! - Define authors, books and per-book tag sets as immutable value records.
//! - Define the read projections returned to use-case callers.
//! - Own input validation shared by repositories and services.
//!
//! # Invariants
//! - Every author and book is identified by a type-tagged id (`model::id`).
//! - Tag sets are satellites of a book and carry no identity of their own.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author;
pub mod book;
pub mod id;

/// Rejected entity input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name is empty or whitespace only.
    EmptyAuthorName,
    /// Book title is empty or whitespace only.
    EmptyBookTitle,
    /// A tag is empty or whitespace only.
    EmptyTag,
    /// Text could not be parsed as an entity identifier.
    InvalidId(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthorName => write!(f, "author name must not be empty"),
            Self::EmptyBookTitle => write!(f, "book title must not be empty"),
            Self::EmptyTag => write!(f, "tag must not be empty"),
            Self::InvalidId(value) => write!(f, "invalid identifier: `{value}`"),
        }
    }
}

impl Error for ValidationError {}

//! Author domain model.
//!
//! # Invariants
//! - `id` is assigned at creation and never reassigned.
//! - `name` is non-empty; uniqueness is enforced by storage.

use crate::model::id::AuthorId;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Catalog author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: AuthorId,
    name: String,
}

impl Author {
    /// Creates a new author with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(AuthorId::new(), name)
    }

    /// Creates an author for an id that already exists, e.g. on read-back.
    pub fn with_id(id: AuthorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this author carrying a new name and the same id.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::with_id(self.id, name)
    }

    /// Checks fields required before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_author_name(&self.name)
    }
}

/// One row of the author listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: AuthorId,
    pub name: String,
}

/// Rejects empty or whitespace-only author names.
pub fn validate_author_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyAuthorName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Author;
    use crate::model::ValidationError;

    #[test]
    fn renamed_keeps_identity() {
        let author = Author::new("Joanne Rowling");
        let renamed = author.renamed("J. K. Rowling");
        assert_eq!(renamed.id(), author.id());
        assert_eq!(renamed.name(), "J. K. Rowling");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            Author::new("   ").validate(),
            Err(ValidationError::EmptyAuthorName)
        );
    }
}

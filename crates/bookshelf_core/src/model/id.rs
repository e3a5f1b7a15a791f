//! Type-tagged entity identifiers.
//!
//! # Responsibility
//! - Generate opaque 128-bit identifiers for catalog entities.
//! - Keep identifiers of different entity kinds apart at the type level.
//!
//! # Invariants
//! - `AuthorId` and `BookId` never coerce into each other, even though both
//!   render as the same canonical UUID text.
//! - An identifier value never changes after construction.

use crate::model::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// UUID tagged with the entity kind it identifies.
///
/// `Tag` is a zero-sized marker; it only exists at compile time.
pub struct TaggedId<Tag> {
    value: Uuid,
    _tag: PhantomData<fn() -> Tag>,
}

/// Marker for author identifiers.
#[derive(Debug)]
pub enum AuthorTag {}

/// Marker for book identifiers.
#[derive(Debug)]
pub enum BookTag {}

/// Stable identifier of an `Author`.
pub type AuthorId = TaggedId<AuthorTag>;

/// Stable identifier of a `Book`.
pub type BookId = TaggedId<BookTag>;

impl<Tag> TaggedId<Tag> {
    /// Generates a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wraps an existing UUID, e.g. one read back from storage.
    pub fn from_uuid(value: Uuid) -> Self {
        Self {
            value,
            _tag: PhantomData,
        }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }
}

impl<Tag> Default for TaggedId<Tag> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tag> Clone for TaggedId<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for TaggedId<Tag> {}

impl<Tag> PartialEq for TaggedId<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<Tag> Eq for TaggedId<Tag> {}

impl<Tag> PartialOrd for TaggedId<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Tag> Ord for TaggedId<Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<Tag> Hash for TaggedId<Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<Tag> Debug for TaggedId<Tag> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TaggedId").field(&self.value).finish()
    }
}

impl<Tag> Display for TaggedId<Tag> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.value.hyphenated(), f)
    }
}

impl<Tag> FromStr for TaggedId<Tag> {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

impl<Tag> Serialize for TaggedId<Tag> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value.hyphenated())
    }
}

impl<'de, Tag> Deserialize<'de> for TaggedId<Tag> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthorId, BookId};
    use std::collections::HashSet;

    #[test]
    fn new_ids_do_not_collide() {
        let ids: HashSet<AuthorId> = (0..1000).map(|_| AuthorId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn display_and_parse_agree() {
        let id = BookId::new();
        let parsed: BookId = id.to_string().parse().expect("canonical text should parse");
        assert_eq!(parsed, id);
        assert_eq!(id.to_string().len(), 36);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<AuthorId>().is_err());
    }

    #[test]
    fn serde_uses_hyphenated_text() {
        let id = AuthorId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: AuthorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

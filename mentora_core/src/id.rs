//! Strongly-typed identifiers for the Mentora console.
//!
//! This module provides a set of identifier types that are used throughout
//! the system, ensuring type safety and clear semantics. Entity identifiers
//! (institutions, courses, modules, actors) are numeric, matching the
//! upstream directory service; token identifiers are minted locally and are
//! UUID-based.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A type-safe numeric identifier.
///
/// Common traits are implemented by hand rather than derived so that they
/// do not demand bounds on the phantom marker parameter.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T> {
    value: u64,
    #[serde(skip)]
    _marker: std::marker::PhantomData<T>,
}

impl<T> Id<T> {
    /// Create an identifier from a raw numeric value.
    pub fn new(value: u64) -> Self {
        Self {
            value,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the underlying numeric value.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.parse()?))
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// Marker type for institutions.
pub struct InstitutionMarker;
/// Identifier for an institution.
pub type InstitutionId = Id<InstitutionMarker>;

/// Marker type for courses.
pub struct CourseMarker;
/// Identifier for a course.
pub type CourseId = Id<CourseMarker>;

/// Marker type for modules.
pub struct ModuleMarker;
/// Identifier for a module.
pub type ModuleId = Id<ModuleMarker>;

/// Marker type for actors (console users).
pub struct ActorMarker;
/// Identifier for an actor.
pub type ActorId = Id<ActorMarker>;

/// Identifier for a module access token.
///
/// Tokens are minted by this system rather than seeded from the directory
/// service, so their identifiers are random UUIDs instead of numeric ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(Uuid);

impl TokenId {
    /// Mint a new random token identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a token identifier from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_parse() {
        let id = CourseId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(CourseId::from_str("42").unwrap(), id);
    }

    #[test]
    fn test_type_safety() {
        let course_id = CourseId::new(7);
        let module_id = ModuleId::new(7);

        assert_eq!(course_id.value(), module_id.value());
        // But they're still different types.
        // This would not compile:
        // assert_eq!(course_id, module_id);
    }

    #[test]
    fn test_token_id_unique() {
        let id1 = TokenId::generate();
        let id2 = TokenId::generate();
        assert_ne!(id1, id2, "Generated token IDs should be unique");
    }
}

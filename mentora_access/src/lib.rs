//! # Mentora Access
//!
//! `mentora_access` decides, for every list/read/write operation in the
//! admin console, which institutions, courses, and modules a given actor
//! may see or mutate.
//!
//! Key concepts:
//!
//! 1. **RoleRegistry**: a static table mapping each role to a scope kind,
//!    so call sites never compare role names.
//!
//! 2. **Scope**: a predicate over resources derived from the actor once per
//!    request, never memoized across requests.
//!
//! 3. **AccessGuard**: authorizes a concrete action against a concrete
//!    resource, distinguishing "must appear not to exist" from "visible but
//!    not permitted".
//!
//! 4. **QueryFilter**: the pure `Scope -> filter` translation consumed by
//!    the list-display collaborator.

pub mod filter;
pub mod guard;
pub mod registry;
pub mod scope;

// Re-export key types for convenience
pub use filter::QueryFilter;
pub use guard::{AccessGuard, Action, Decision, ResourceRef};
pub use registry::{RoleRegistry, ScopeKind};
pub use scope::{Scope, ScopeResolver};

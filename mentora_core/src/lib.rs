//! # Mentora Core
//!
//! `mentora_core` provides the shared foundation for the Mentora tutoring
//! platform's administrative console: strongly-typed identifiers, the
//! three-level tenancy entities (institution, course, module), the catalog
//! that resolves a resource to its owning tenant, and the error hierarchy.
//!
//! Key concepts:
//!
//! 1. **Actor**: an authenticated identity, reconstructed per request.
//!
//! 2. **Tenancy chain**: every module belongs to exactly one course, and
//!    every course to exactly one institution. Scoping decisions follow
//!    this chain transitively.
//!
//! 3. **Catalog**: the directory used to walk the tenancy chain. A broken
//!    chain is a data-integrity error, never a normal denial.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod id;

// Re-export key types for convenience
pub use catalog::{Catalog, InMemoryCatalog};
pub use entity::{Actor, AdminAccount, Course, Institution, Module, Role, SubscriptionTier};
pub use error::{AccessError, CatalogError, ConfigError, Error, Result, TokenError};
pub use id::{ActorId, CourseId, InstitutionId, ModuleId, TokenId};

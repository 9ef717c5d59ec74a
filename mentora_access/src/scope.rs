//! Scope resolution.
//!
//! This module derives a `Scope` from an `Actor`. Resolution is pure and
//! side-effect-free, and it is recomputed on every request so that role and
//! assignment edits take effect on the very next call. Caching a resolved
//! scope across requests is a security bug.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use mentora_core::entity::Actor;
use mentora_core::error::ConfigError;
use mentora_core::id::{CourseId, InstitutionId};

use crate::registry::{RoleRegistry, ScopeKind};

/// A predicate over resources describing what an actor may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Every tenant is visible.
    Unrestricted,
    /// Only resources owned (transitively) by this institution are visible.
    Institution(InstitutionId),
    /// Only these courses, and modules inside them, are visible. An empty
    /// set is a valid scope that sees nothing.
    CourseSet(HashSet<CourseId>),
}

/// Derives a `Scope` for an actor from the role registry.
#[derive(Clone, Debug)]
pub struct ScopeResolver {
    registry: RoleRegistry,
}

impl ScopeResolver {
    /// Create a resolver over the given registry.
    pub fn new(registry: RoleRegistry) -> Self {
        Self { registry }
    }

    /// A resolver over the built-in role table.
    pub fn builtin() -> Self {
        Self::new(RoleRegistry::builtin())
    }

    /// Resolve the scope for an actor.
    ///
    /// An actor whose role demands scoping data that is absent yields a
    /// `ConfigError`; the resolver never falls back to `Unrestricted`.
    pub fn resolve(&self, actor: &Actor) -> Result<Scope, ConfigError> {
        let kind = self
            .registry
            .scope_kind(&actor.role)
            .ok_or_else(|| ConfigError::UnknownRole {
                role: format!("{:?}", actor.role),
            })?;

        match kind {
            ScopeKind::Global => Ok(Scope::Unrestricted),
            ScopeKind::InstitutionScoped => {
                let institution_id = actor
                    .institution_id
                    .ok_or(ConfigError::MissingInstitution { actor: actor.id })?;
                Ok(Scope::Institution(institution_id))
            }
            ScopeKind::AssignmentScoped => {
                let course_ids = actor
                    .assigned_course_ids
                    .clone()
                    .ok_or(ConfigError::MissingAssignments { actor: actor.id })?;
                Ok(Scope::CourseSet(course_ids))
            }
        }
    }
}

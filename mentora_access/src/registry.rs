//! Role registry.
//!
//! This module defines the table that maps each console role to a scope
//! kind. Authorization call sites consume scope kinds, never role names, so
//! adding a role requires only a table entry.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use mentora_core::entity::Role;

/// The kind of scope a role resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    /// Unrestricted visibility across all tenants.
    Global,
    /// Visibility limited to the actor's institution.
    InstitutionScoped,
    /// Visibility limited to the actor's explicit course assignments.
    AssignmentScoped,
}

lazy_static! {
    static ref BUILTIN_ROLES: HashMap<Role, ScopeKind> = {
        let mut table = HashMap::new();
        table.insert(Role::SuperAdmin, ScopeKind::Global);
        table.insert(Role::InstitutionAdmin, ScopeKind::InstitutionScoped);
        table.insert(Role::ProfessorAdmin, ScopeKind::InstitutionScoped);
        table.insert(Role::Professor, ScopeKind::AssignmentScoped);
        table
    };
}

/// The role-to-scope-kind lookup table.
#[derive(Clone, Debug)]
pub struct RoleRegistry {
    table: HashMap<Role, ScopeKind>,
}

impl RoleRegistry {
    /// A registry containing only the built-in console roles.
    pub fn builtin() -> Self {
        Self {
            table: BUILTIN_ROLES.clone(),
        }
    }

    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register a role, replacing any existing entry.
    pub fn register(&mut self, role: Role, kind: ScopeKind) {
        self.table.insert(role, kind);
    }

    /// Look up the scope kind for a role.
    pub fn scope_kind(&self, role: &Role) -> Option<ScopeKind> {
        self.table.get(role).copied()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

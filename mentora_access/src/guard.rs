//! Access guard.
//!
//! This module authorizes a specific action against a specific resource
//! using a resolved scope. Scope mismatches deny as "not found" so that a
//! denial never confirms a cross-tenant resource exists; capability-level
//! rules layered on top of scope deny as "forbidden" instead, which is the
//! "you may know this exists but may not act on it" case.

use serde::{Deserialize, Serialize};
use tracing::debug;

use mentora_core::catalog::Catalog;
use mentora_core::error::Result;
use mentora_core::id::{ActorId, CourseId, InstitutionId, ModuleId};

use crate::scope::Scope;

/// The action an actor is attempting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Write,
    Delete,
}

/// A reference to the resource an action targets.
///
/// Courses and modules are referenced by id alone; the guard resolves their
/// owning institution through the catalog rather than trusting
/// caller-supplied parent ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceRef {
    Institution(InstitutionId),
    Course(CourseId),
    Module(ModuleId),
    /// An administrative console account. Accounts are platform-level
    /// resources, visible only to the unrestricted scope.
    Account { id: ActorId, is_protected: bool },
}

/// The outcome of an authorization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The action may proceed.
    Allow,
    /// The resource must appear not to exist to this actor.
    DenyNotFound,
    /// The resource is visible, but the action is not permitted.
    DenyForbidden,
}

impl Decision {
    /// Whether this decision permits the action.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Authorizes actions against resources using a resolved scope.
#[derive(Clone)]
pub struct AccessGuard<C> {
    catalog: C,
}

impl<C: Catalog> AccessGuard<C> {
    /// Create a guard over the given catalog.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Authorize `action` on `resource` under `scope`.
    ///
    /// Denials are returned as values, never as errors; only catalog
    /// integrity failures propagate as errors.
    pub fn authorize(&self, scope: &Scope, action: Action, resource: &ResourceRef) -> Result<Decision> {
        let visibility = self.visibility(scope, resource)?;
        if !visibility.is_allowed() {
            debug!(?action, ?resource, "denied: out of scope");
            return Ok(visibility);
        }

        // Capability rules, layered on top of scope.
        if action == Action::Delete {
            if let ResourceRef::Account { is_protected: true, id } = resource {
                debug!(account = %id, "denied: protected account");
                return Ok(Decision::DenyForbidden);
            }
            if matches!(resource, ResourceRef::Institution(_)) && *scope != Scope::Unrestricted {
                debug!(?resource, "denied: institution deletion is platform-level");
                return Ok(Decision::DenyForbidden);
            }
        }

        Ok(Decision::Allow)
    }

    /// Authorize managing access tokens of `module_id` under `scope`.
    ///
    /// Token management requires an administrative scope: an
    /// assignment-scoped professor may see the module but may not create or
    /// mutate its tokens, which is a visible-but-forbidden denial. An
    /// out-of-scope module still denies as not found.
    pub fn authorize_token_management(&self, scope: &Scope, module_id: ModuleId) -> Result<Decision> {
        let visibility = self.visibility(scope, &ResourceRef::Module(module_id))?;
        if !visibility.is_allowed() {
            return Ok(visibility);
        }
        if matches!(scope, Scope::CourseSet(_)) {
            debug!(module = %module_id, "denied: token management requires an administrative scope");
            return Ok(Decision::DenyForbidden);
        }
        Ok(Decision::Allow)
    }

    /// Pure scope predicate: may `scope` see `resource` at all?
    ///
    /// This is the filter the list operations share with `authorize`; it
    /// carries no capability rules.
    pub fn visibility(&self, scope: &Scope, resource: &ResourceRef) -> Result<Decision> {
        let visible = match scope {
            Scope::Unrestricted => true,
            Scope::Institution(institution_id) => match resource {
                ResourceRef::Institution(id) => id == institution_id,
                ResourceRef::Course(id) => {
                    self.catalog.institution_of_course(*id)? == *institution_id
                }
                ResourceRef::Module(id) => {
                    self.catalog.institution_of_module(*id)? == *institution_id
                }
                // Accounts are platform-level.
                ResourceRef::Account { .. } => false,
            },
            Scope::CourseSet(course_ids) => match resource {
                ResourceRef::Course(id) => course_ids.contains(id),
                ResourceRef::Module(id) => {
                    course_ids.contains(&self.catalog.course_of_module(*id)?)
                }
                ResourceRef::Institution(_) | ResourceRef::Account { .. } => false,
            },
        };

        if visible {
            Ok(Decision::Allow)
        } else {
            Ok(Decision::DenyNotFound)
        }
    }
}

//! Tenancy entities and actor identity.
//!
//! This module defines the three nested tenancy levels (institution, course,
//! module) and the per-request actor identity that scoping decisions are
//! derived from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::id::{ActorId, CourseId, InstitutionId, ModuleId};

/// Subscription tier of an institution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Basic,
    Standard,
    Premium,
}

/// An institution, the top tenancy level. Owns zero or more courses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: InstitutionId,
    pub name: String,
    pub subscription_tier: SubscriptionTier,
}

/// A course. Belongs to exactly one institution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub institution_id: InstitutionId,
    /// Professors explicitly assigned to this course. Assignment-scoped
    /// visibility is defined over this set.
    pub assigned_professor_ids: HashSet<ActorId>,
}

/// A module. Belongs to exactly one course, and transitively to exactly
/// one institution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub course_id: CourseId,
}

/// A console role.
///
/// Role names never appear in authorization call sites; the role registry
/// maps each role to a scope kind, so adding a role is a table entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator. Sees every tenant.
    SuperAdmin,
    /// Administrator of a single institution.
    InstitutionAdmin,
    /// Elevated professor with institution-wide visibility.
    ProfessorAdmin,
    /// Regular professor, limited to explicitly assigned courses.
    Professor,
    /// A role defined outside the built-in table.
    Custom(String),
}

/// An authenticated identity attempting an operation.
///
/// An `Actor` is reconstructed from session state on every request and must
/// never be cached across requests: role and course assignments can change
/// between requests, and a stale actor is a security bug rather than a
/// performance nuisance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    /// Present for institution-scoped roles.
    pub institution_id: Option<InstitutionId>,
    /// Present only for the assignment-scoped professor role.
    pub assigned_course_ids: Option<HashSet<CourseId>>,
}

impl Actor {
    /// A platform super-admin.
    pub fn super_admin(id: ActorId) -> Self {
        Self {
            id,
            role: Role::SuperAdmin,
            institution_id: None,
            assigned_course_ids: None,
        }
    }

    /// An administrator of `institution_id`.
    pub fn institution_admin(id: ActorId, institution_id: InstitutionId) -> Self {
        Self {
            id,
            role: Role::InstitutionAdmin,
            institution_id: Some(institution_id),
            assigned_course_ids: None,
        }
    }

    /// An elevated professor with visibility over all of `institution_id`.
    pub fn professor_admin(id: ActorId, institution_id: InstitutionId) -> Self {
        Self {
            id,
            role: Role::ProfessorAdmin,
            institution_id: Some(institution_id),
            assigned_course_ids: None,
        }
    }

    /// A regular professor limited to the given course assignments.
    pub fn professor(id: ActorId, assigned_course_ids: HashSet<CourseId>) -> Self {
        Self {
            id,
            role: Role::Professor,
            institution_id: None,
            assigned_course_ids: Some(assigned_course_ids),
        }
    }
}

/// An administrative console account record.
///
/// The seeded primary super-admin account carries `is_protected = true`,
/// which blocks deletion at the guard layer. The flag is set at seed time;
/// no call site compares account ids against literal constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: ActorId,
    pub email: String,
    pub is_protected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_constructors_match_role_shape() {
        let admin = Actor::institution_admin(ActorId::new(1), InstitutionId::new(9));
        assert_eq!(admin.institution_id, Some(InstitutionId::new(9)));
        assert!(admin.assigned_course_ids.is_none());

        let prof = Actor::professor(ActorId::new(2), [CourseId::new(10)].into_iter().collect());
        assert!(prof.institution_id.is_none());
        assert_eq!(
            prof.assigned_course_ids.as_ref().map(|s| s.len()),
            Some(1)
        );
    }
}

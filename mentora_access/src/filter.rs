//! Scope-derived list filtering.
//!
//! Scoped list endpoints accept an optional institution filter from the
//! client; the effective filter is always derived server-side from the
//! resolved scope, and a client-supplied filter may only narrow it, never
//! widen it. `QueryFilter::from_scope` is the single pure translation from
//! a scope to a listing predicate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use mentora_core::catalog::Catalog;
use mentora_core::entity::{Course, Institution, Module};
use mentora_core::error::{AccessError, Result};
use mentora_core::id::{CourseId, InstitutionId};

use crate::scope::Scope;

/// A predicate applied to list queries.
///
/// `None` in a field means "no constraint on that axis". Both constraints
/// apply conjunctively, so adding one can only shrink the result set.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryFilter {
    pub institution_id: Option<InstitutionId>,
    pub course_ids: Option<HashSet<CourseId>>,
}

impl QueryFilter {
    /// Derive the filter for a scope.
    pub fn from_scope(scope: &Scope) -> Self {
        match scope {
            Scope::Unrestricted => Self::default(),
            Scope::Institution(id) => Self {
                institution_id: Some(*id),
                course_ids: None,
            },
            Scope::CourseSet(ids) => Self {
                institution_id: None,
                course_ids: Some(ids.clone()),
            },
        }
    }

    /// Apply a client-requested institution filter on top of this one.
    ///
    /// The request may only narrow: asking for an institution outside the
    /// scope-derived filter denies as a scope violation (surfaced as "not
    /// found" by the transport).
    pub fn narrow(&self, requested: Option<InstitutionId>) -> Result<Self> {
        let requested = match requested {
            Some(id) => id,
            None => return Ok(self.clone()),
        };

        match self.institution_id {
            None => Ok(Self {
                institution_id: Some(requested),
                course_ids: self.course_ids.clone(),
            }),
            Some(scoped) if scoped == requested => Ok(self.clone()),
            Some(_) => Err(AccessError::ScopeViolation.into()),
        }
    }

    fn matches_course(&self, course: &Course) -> bool {
        if let Some(institution_id) = self.institution_id {
            if course.institution_id != institution_id {
                return false;
            }
        }
        if let Some(course_ids) = &self.course_ids {
            if !course_ids.contains(&course.id) {
                return false;
            }
        }
        true
    }
}

/// List institutions visible through `filter`.
pub fn list_institutions<C: Catalog>(catalog: &C, filter: &QueryFilter) -> Vec<Institution> {
    // A course-set scope confers no institution-level visibility.
    if filter.course_ids.is_some() {
        return Vec::new();
    }
    catalog
        .institutions()
        .into_iter()
        .filter(|institution| match filter.institution_id {
            Some(id) => institution.id == id,
            None => true,
        })
        .collect()
}

/// List courses visible through `filter`.
pub fn list_courses<C: Catalog>(catalog: &C, filter: &QueryFilter) -> Vec<Course> {
    catalog
        .courses()
        .into_iter()
        .filter(|course| filter.matches_course(course))
        .collect()
}

/// List modules visible through `filter`.
///
/// Module visibility resolves through the owning course; a module whose
/// course is missing surfaces the catalog integrity error instead of
/// silently appearing or disappearing.
pub fn list_modules<C: Catalog>(catalog: &C, filter: &QueryFilter) -> Result<Vec<Module>> {
    let mut visible = Vec::new();
    for module in catalog.modules() {
        let course = match catalog.course(module.course_id) {
            Some(course) => course,
            None => {
                return Err(mentora_core::error::CatalogError::CourseNotFound(module.course_id).into())
            }
        };
        if filter.matches_course(&course) {
            visible.push(module);
        }
    }
    Ok(visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentora_core::catalog::InMemoryCatalog;
    use mentora_core::entity::SubscriptionTier;
    use mentora_core::id::ModuleId;

    fn catalog() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        for id in [1u64, 2] {
            catalog.insert_institution(Institution {
                id: InstitutionId::new(id),
                name: format!("institution-{id}"),
                subscription_tier: SubscriptionTier::Basic,
            });
        }
        for (course, institution) in [(10u64, 1u64), (11, 1), (20, 2)] {
            catalog.insert_course(Course {
                id: CourseId::new(course),
                institution_id: InstitutionId::new(institution),
                assigned_professor_ids: HashSet::new(),
            });
        }
        for (module, course) in [(100u64, 10u64), (110, 11), (200, 20)] {
            catalog.insert_module(Module {
                id: ModuleId::new(module),
                course_id: CourseId::new(course),
            });
        }
        catalog
    }

    #[test]
    fn test_assignment_scope_lists_exactly_the_assigned_intersection() {
        let catalog = catalog();
        // Course 99 is assigned but does not exist; it must not appear.
        let scope = Scope::CourseSet([CourseId::new(10), CourseId::new(99)].into_iter().collect());
        let filter = QueryFilter::from_scope(&scope);

        let courses = list_courses(&catalog, &filter);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, CourseId::new(10));
    }

    #[test]
    fn test_institution_scope_never_lists_foreign_modules() {
        let catalog = catalog();
        let filter = QueryFilter::from_scope(&Scope::Institution(InstitutionId::new(1)));

        let modules = list_modules(&catalog, &filter).unwrap();
        let ids: HashSet<_> = modules.iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            [ModuleId::new(100), ModuleId::new(110)].into_iter().collect()
        );
    }

    #[test]
    fn test_client_filter_narrows_unrestricted() {
        let catalog = catalog();
        let filter = QueryFilter::from_scope(&Scope::Unrestricted)
            .narrow(Some(InstitutionId::new(2)))
            .unwrap();

        let courses = list_courses(&catalog, &filter);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, CourseId::new(20));
    }

    #[test]
    fn test_client_filter_cannot_widen_institution_scope() {
        let filter = QueryFilter::from_scope(&Scope::Institution(InstitutionId::new(1)));

        let err = filter.narrow(Some(InstitutionId::new(2))).unwrap_err();
        assert_eq!(err.http_status(), 404);

        // Re-requesting the scoped institution is a no-op.
        let same = filter.narrow(Some(InstitutionId::new(1))).unwrap();
        assert_eq!(same, filter);
    }

    #[test]
    fn test_course_set_scope_sees_no_institutions() {
        let catalog = catalog();
        let filter =
            QueryFilter::from_scope(&Scope::CourseSet([CourseId::new(10)].into_iter().collect()));
        assert!(list_institutions(&catalog, &filter).is_empty());
    }

    #[test]
    fn test_empty_course_set_lists_nothing() {
        let catalog = catalog();
        let filter = QueryFilter::from_scope(&Scope::CourseSet(HashSet::new()));
        assert!(list_courses(&catalog, &filter).is_empty());
        assert!(list_modules(&catalog, &filter).unwrap().is_empty());
    }
}

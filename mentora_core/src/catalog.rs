//! Tenancy catalog.
//!
//! The catalog is the directory the authorization engine walks to resolve a
//! resource to its owning tenant: module → course → institution. Scoping
//! decisions never trust identity claims supplied by the client; they
//! always resolve ownership through this chain.

use std::sync::Arc;

use dashmap::DashMap;

use crate::entity::{Course, Institution, Module};
use crate::error::{CatalogError, Result};
use crate::id::{CourseId, InstitutionId, ModuleId};

/// Trait for the tenancy directory.
///
/// A missing parent in the chain (a course without its institution, a
/// module without its course) is a data-integrity error surfaced as
/// `CatalogError`, never a normal access denial.
pub trait Catalog: Send + Sync {
    /// Get an institution by id.
    fn institution(&self, id: InstitutionId) -> Option<Institution>;

    /// Get a course by id.
    fn course(&self, id: CourseId) -> Option<Course>;

    /// Get a module by id.
    fn module(&self, id: ModuleId) -> Option<Module>;

    /// List all institutions.
    fn institutions(&self) -> Vec<Institution>;

    /// List all courses.
    fn courses(&self) -> Vec<Course>;

    /// List all modules.
    fn modules(&self) -> Vec<Module>;

    /// Resolve the institution that owns a course.
    fn institution_of_course(&self, id: CourseId) -> Result<InstitutionId> {
        let course = self.course(id).ok_or(CatalogError::CourseNotFound(id))?;
        Ok(course.institution_id)
    }

    /// Resolve the course that owns a module.
    fn course_of_module(&self, id: ModuleId) -> Result<CourseId> {
        let module = self.module(id).ok_or(CatalogError::ModuleNotFound(id))?;
        Ok(module.course_id)
    }

    /// Resolve the institution that transitively owns a module.
    fn institution_of_module(&self, id: ModuleId) -> Result<InstitutionId> {
        let course_id = self.course_of_module(id)?;
        self.institution_of_course(course_id)
    }
}

/// An in-memory tenancy catalog.
///
/// Used by tests and by the console's seeding path. Clones share the same
/// underlying maps.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    institutions: Arc<DashMap<InstitutionId, Institution>>,
    courses: Arc<DashMap<CourseId, Course>>,
    modules: Arc<DashMap<ModuleId, Module>>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an institution.
    pub fn insert_institution(&self, institution: Institution) {
        self.institutions.insert(institution.id, institution);
    }

    /// Insert or replace a course.
    pub fn insert_course(&self, course: Course) {
        self.courses.insert(course.id, course);
    }

    /// Insert or replace a module.
    pub fn insert_module(&self, module: Module) {
        self.modules.insert(module.id, module);
    }

    /// Remove a course.
    pub fn remove_course(&self, id: CourseId) {
        self.courses.remove(&id);
    }

    /// Remove a module.
    pub fn remove_module(&self, id: ModuleId) {
        self.modules.remove(&id);
    }
}

impl Catalog for InMemoryCatalog {
    fn institution(&self, id: InstitutionId) -> Option<Institution> {
        self.institutions.get(&id).map(|entry| entry.value().clone())
    }

    fn course(&self, id: CourseId) -> Option<Course> {
        self.courses.get(&id).map(|entry| entry.value().clone())
    }

    fn module(&self, id: ModuleId) -> Option<Module> {
        self.modules.get(&id).map(|entry| entry.value().clone())
    }

    fn institutions(&self) -> Vec<Institution> {
        self.institutions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn courses(&self) -> Vec<Course> {
        self.courses.iter().map(|entry| entry.value().clone()).collect()
    }

    fn modules(&self) -> Vec<Module> {
        self.modules.iter().map(|entry| entry.value().clone()).collect()
    }
}

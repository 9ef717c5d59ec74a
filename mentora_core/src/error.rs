//! Error types for the Mentora console.
//!
//! This module defines the error hierarchy used throughout the system.
//! Normal access denials are typed values that callers branch on to pick a
//! response status; only configuration errors are treated as exceptional,
//! since they indicate corrupted actor state rather than a legitimate
//! access decision.

use thiserror::Error;

use crate::id::{ActorId, CourseId, InstitutionId, ModuleId};

/// Root error type for the Mentora console.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl Error {
    /// Map this error to the HTTP status code the console transport uses.
    ///
    /// Out-of-scope resources and unknown tokens are intentionally conflated
    /// with "not found" so that a denial never confirms a cross-tenant
    /// resource exists.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Access(AccessError::ScopeViolation) => 404,
            Error::Access(AccessError::CapabilityDenied(_)) => 403,
            Error::Access(AccessError::Config(_)) => 500,
            Error::Token(TokenError::Malformed) => 401,
            Error::Token(TokenError::NotFound) => 404,
            Error::Token(TokenError::Revoked) => 410,
            Error::Token(TokenError::Expired) => 410,
            Error::Token(TokenError::Validation(_)) => 400,
            Error::Catalog(_) => 404,
        }
    }
}

/// Errors indicating corrupted actor configuration.
///
/// An actor whose role demands scoping data that is absent must fail hard;
/// silently defaulting to an unrestricted scope would turn a data-integrity
/// bug into a cross-tenant leak.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("actor {actor} has an institution-scoped role but no institution id")]
    MissingInstitution { actor: ActorId },

    #[error("actor {actor} has an assignment-scoped role but no course assignments")]
    MissingAssignments { actor: ActorId },

    #[error("role {role} is not present in the role registry")]
    UnknownRole { role: String },
}

/// Errors related to authorization decisions.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The resource is outside the actor's scope. Presented as "not found".
    #[error("resource is not visible in the current scope")]
    ScopeViolation,

    /// The resource is visible, but the action is not permitted.
    #[error("operation not permitted: {0}")]
    CapabilityDenied(String),

    #[error("scope configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to module access tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The presented value is empty or not a syntactically valid secret.
    #[error("malformed token")]
    Malformed,

    /// No token matches the presented secret.
    #[error("token not found")]
    NotFound,

    /// The token was explicitly deactivated.
    #[error("token has been revoked")]
    Revoked,

    /// The token's expiry timestamp has passed.
    #[error("token has expired")]
    Expired,

    /// A create/update request carried invalid fields.
    #[error("invalid token request: {0}")]
    Validation(String),
}

/// Errors indicating a broken tenancy chain in the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("institution not found: {0}")]
    InstitutionNotFound(InstitutionId),

    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    #[error("module not found: {0}")]
    ModuleNotFound(ModuleId),
}

/// Result type used throughout the Mentora console.
pub type Result<T> = std::result::Result<T, Error>;

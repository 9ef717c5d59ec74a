//! Module access token model.
//!
//! A token is bound to exactly one module for its entire lifetime; there is
//! no way to re-point it. Deactivation (`is_active = false`) is a manual
//! revocation switch, independent of expiry; a token is valid iff it is
//! active and its optional expiry has not passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mentora_core::error::AccessError;
use mentora_core::id::{ModuleId, TokenId};

/// Capability bits attached to a token rather than to a user identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenCapabilities {
    pub allow_chat: bool,
    pub allow_file_access: bool,
}

impl TokenCapabilities {
    /// No capabilities.
    pub fn none() -> Self {
        Self::default()
    }

    /// Chat only.
    pub fn chat_only() -> Self {
        Self {
            allow_chat: true,
            allow_file_access: false,
        }
    }

    /// Chat and file access.
    pub fn full() -> Self {
        Self {
            allow_chat: true,
            allow_file_access: true,
        }
    }
}

/// An opaque bearer token granting external access to one module.
///
/// Deliberately not serializable: the only serialized shapes are
/// `TokenView` and, at creation time, `IssuedToken`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleAccessToken {
    pub id: TokenId,
    /// Immutable for the token's lifetime; no setter exists anywhere.
    pub module_id: ModuleId,
    /// The raw secret. Leaves this crate only inside `IssuedToken`, once.
    pub(crate) secret: String,
    pub name: String,
    pub description: Option<String>,
    pub capabilities: TokenCapabilities,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ModuleAccessToken {
    /// Whether the optional expiry has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// Whether the token is valid: active and not expired.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

/// The manager-facing view of a token. Never carries the secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenView {
    pub id: TokenId,
    pub module_id: ModuleId,
    pub name: String,
    pub description: Option<String>,
    pub capabilities: TokenCapabilities,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&ModuleAccessToken> for TokenView {
    fn from(token: &ModuleAccessToken) -> Self {
        Self {
            id: token.id,
            module_id: token.module_id,
            name: token.name.clone(),
            description: token.description.clone(),
            capabilities: token.capabilities,
            is_active: token.is_active,
            expires_at: token.expires_at,
            created_at: token.created_at,
        }
    }
}

/// The creation response: the only place the raw secret is ever readable.
#[derive(Clone, Debug, Serialize)]
pub struct IssuedToken {
    pub token: TokenView,
    pub secret: String,
}

/// The resolved capability set a validated external token confers.
///
/// A grant is a snapshot taken at authentication time; later capability
/// edits affect the next `authenticate` call, not grants already returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveGrant {
    pub module_id: ModuleId,
    pub capabilities: TokenCapabilities,
}

impl EffectiveGrant {
    /// Require the chat capability.
    pub fn require_chat(&self) -> Result<(), AccessError> {
        if self.capabilities.allow_chat {
            Ok(())
        } else {
            Err(AccessError::CapabilityDenied("token does not permit chat".into()))
        }
    }

    /// Require the file-access capability.
    pub fn require_file_access(&self) -> Result<(), AccessError> {
        if self.capabilities.allow_file_access {
            Ok(())
        } else {
            Err(AccessError::CapabilityDenied(
                "token does not permit file access".into(),
            ))
        }
    }
}

/// A partial update to a token.
///
/// `module_id` is deliberately absent: tokens cannot be re-pointed. The
/// double `Option` on `description` and `expires_at` distinguishes "leave
/// unchanged" from "clear".
#[derive(Clone, Debug, Default)]
pub struct TokenUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub capabilities: Option<TokenCapabilities>,
    pub is_active: Option<bool>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl TokenUpdate {
    /// An update that renames the token.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// An update that replaces the capability bits.
    pub fn set_capabilities(capabilities: TokenCapabilities) -> Self {
        Self {
            capabilities: Some(capabilities),
            ..Self::default()
        }
    }

    /// An update that toggles the active switch.
    pub fn set_active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: Option<DateTime<Utc>>, is_active: bool) -> ModuleAccessToken {
        ModuleAccessToken {
            id: TokenId::generate(),
            module_id: ModuleId::new(5),
            secret: "ab".repeat(32),
            name: "widget".into(),
            description: None,
            capabilities: TokenCapabilities::chat_only(),
            is_active,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validity_requires_active_and_unexpired() {
        let now = Utc::now();

        assert!(token(None, true).is_valid(now));
        assert!(!token(None, false).is_valid(now));
        assert!(!token(Some(now - Duration::hours(1)), true).is_valid(now));
        assert!(token(Some(now + Duration::hours(1)), true).is_valid(now));
    }

    #[test]
    fn test_no_expiry_means_valid_indefinitely() {
        let now = Utc::now();
        let token = token(None, true);
        assert!(token.is_valid(now + Duration::days(365)));
    }

    #[test]
    fn test_grant_capability_checks() {
        let grant = EffectiveGrant {
            module_id: ModuleId::new(5),
            capabilities: TokenCapabilities::chat_only(),
        };
        assert!(grant.require_chat().is_ok());
        assert!(matches!(
            grant.require_file_access(),
            Err(AccessError::CapabilityDenied(_))
        ));
    }

    #[test]
    fn test_view_serialization_never_leaks_the_secret() {
        let token = token(None, true);
        let json = serde_json::to_string(&TokenView::from(&token)).unwrap();
        assert!(!json.contains(token.secret()));
        assert!(!json.contains("secret"));
    }
}

//! External token authentication.
//!
//! For external (unauthenticated) widget requests, token validation
//! substitutes for actor and scope resolution: a valid token yields an
//! `EffectiveGrant` limited to one module and its capability bits, and
//! every later capability check is a direct field check on the grant.

use chrono::{DateTime, Utc};
use tracing::debug;

use mentora_core::error::TokenError;

use crate::model::EffectiveGrant;
use crate::store::TokenStore;

/// Validates presented tokens on inbound external requests.
#[derive(Clone)]
pub struct TokenAuthenticator<S> {
    store: S,
}

impl<S: TokenStore> TokenAuthenticator<S> {
    /// Create an authenticator over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Authenticate a presented raw token.
    ///
    /// Validation reads current token state on every call; a revocation or
    /// capability edit is visible to the very next call. Grants already
    /// returned are immutable snapshots and are not retroactively revoked.
    pub fn authenticate(
        &self,
        presented: &str,
        now: DateTime<Utc>,
    ) -> Result<EffectiveGrant, TokenError> {
        let presented = presented.trim();
        // Generated secrets are hex; anything else is garbled input, not an
        // unknown token.
        if presented.is_empty() || !presented.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TokenError::Malformed);
        }

        let token = self
            .store
            .find_by_secret(presented)
            .ok_or(TokenError::NotFound)?;

        if !token.is_active {
            debug!(token = %token.id, "rejected revoked token");
            return Err(TokenError::Revoked);
        }
        if token.is_expired(now) {
            debug!(token = %token.id, "rejected expired token");
            return Err(TokenError::Expired);
        }

        Ok(EffectiveGrant {
            module_id: token.module_id,
            capabilities: token.capabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModuleAccessToken, TokenCapabilities};
    use crate::store::InMemoryTokenStore;
    use chrono::Duration;
    use mentora_core::id::{ModuleId, TokenId};

    fn store_with(token: ModuleAccessToken) -> InMemoryTokenStore {
        let store = InMemoryTokenStore::new();
        store.insert(token);
        store
    }

    fn token(is_active: bool, expires_at: Option<DateTime<Utc>>) -> ModuleAccessToken {
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
    fn test_valid_token_grants_its_module_and_capabilities() {
        let now = Utc::now();
        let authenticator = TokenAuthenticator::new(store_with(token(true, None)));

        let grant = authenticator.authenticate(&"ab".repeat(32), now).unwrap();
        assert_eq!(grant.module_id, ModuleId::new(5));
        assert!(grant.capabilities.allow_chat);
        assert!(!grant.capabilities.allow_file_access);
    }

    #[test]
    fn test_malformed_token() {
        let now = Utc::now();
        let authenticator = TokenAuthenticator::new(InMemoryTokenStore::new());

        assert_eq!(authenticator.authenticate("", now), Err(TokenError::Malformed));
        assert_eq!(
            authenticator.authenticate("   ", now),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            authenticator.authenticate("not-hex!", now),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_unknown_token() {
        let now = Utc::now();
        let authenticator = TokenAuthenticator::new(store_with(token(true, None)));
        assert_eq!(
            authenticator.authenticate(&"cd".repeat(32), now),
            Err(TokenError::NotFound)
        );
    }

    #[test]
    fn test_revoked_wins_over_far_future_expiry() {
        let now = Utc::now();
        let authenticator =
            TokenAuthenticator::new(store_with(token(false, Some(now + Duration::days(3650)))));
        assert_eq!(
            authenticator.authenticate(&"ab".repeat(32), now),
            Err(TokenError::Revoked)
        );
    }

    #[test]
    fn test_expired_despite_active_flag() {
        let now = Utc::now();
        let authenticator =
            TokenAuthenticator::new(store_with(token(true, Some(now - Duration::minutes(1)))));
        assert_eq!(
            authenticator.authenticate(&"ab".repeat(32), now),
            Err(TokenError::Expired)
        );
    }
}

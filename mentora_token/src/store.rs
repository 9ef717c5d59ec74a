//! Token storage.
//!
//! Tokens are never physically deleted in normal operation; deactivation is
//! the terminal operational state. `remove` exists only for the separate
//! destructive hard-delete operation gated at the manager layer.

use std::sync::Arc;

use dashmap::DashMap;
use subtle::ConstantTimeEq;

use mentora_core::error::TokenError;
use mentora_core::id::TokenId;

use crate::model::ModuleAccessToken;

/// Trait for token storage.
pub trait TokenStore: Send + Sync {
    /// Insert a freshly minted token.
    fn insert(&self, token: ModuleAccessToken);

    /// Get a token by id.
    fn get(&self, id: &TokenId) -> Option<ModuleAccessToken>;

    /// Apply a patch to a token under the store's single-row atomicity.
    ///
    /// The patch observes the current token state, so a mutation that raced
    /// with a revocation still sees `is_active = false`; read-modify-write
    /// against a stale copy is not possible through this interface. A
    /// failed patch leaves the stored token unchanged. Returns the token as
    /// written.
    fn update(
        &self,
        id: &TokenId,
        patch: &mut dyn FnMut(&mut ModuleAccessToken) -> Result<(), TokenError>,
    ) -> Result<ModuleAccessToken, TokenError>;

    /// Physically remove a token. Destructive; not part of the normal
    /// revocation path.
    fn remove(&self, id: &TokenId) -> Result<(), TokenError>;

    /// List every stored token.
    fn list_all(&self) -> Vec<ModuleAccessToken>;

    /// Find the token whose secret matches the presented value.
    ///
    /// The scan compares every stored secret in constant time and never
    /// exits early on a match, so lookup duration does not depend on which
    /// token, if any, matched.
    fn find_by_secret(&self, presented: &str) -> Option<ModuleAccessToken> {
        let presented = presented.as_bytes();
        let mut found = None;
        for token in self.list_all() {
            if bool::from(token.secret().as_bytes().ct_eq(presented)) {
                found = Some(token);
            }
        }
        found
    }
}

/// An in-memory token store. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    tokens: Arc<DashMap<TokenId, ModuleAccessToken>>,
}

impl InMemoryTokenStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn insert(&self, token: ModuleAccessToken) {
        self.tokens.insert(token.id, token);
    }

    fn get(&self, id: &TokenId) -> Option<ModuleAccessToken> {
        self.tokens.get(id).map(|entry| entry.value().clone())
    }

    fn update(
        &self,
        id: &TokenId,
        patch: &mut dyn FnMut(&mut ModuleAccessToken) -> Result<(), TokenError>,
    ) -> Result<ModuleAccessToken, TokenError> {
        // The entry guard holds the row lock for the whole read-patch-write.
        let mut entry = self.tokens.get_mut(id).ok_or(TokenError::NotFound)?;
        let mut staged = entry.value().clone();
        patch(&mut staged)?;
        *entry.value_mut() = staged.clone();
        Ok(staged)
    }

    fn remove(&self, id: &TokenId) -> Result<(), TokenError> {
        if self.tokens.remove(id).is_none() {
            return Err(TokenError::NotFound);
        }
        Ok(())
    }

    fn list_all(&self) -> Vec<ModuleAccessToken> {
        self.tokens.iter().map(|entry| entry.value().clone()).collect()
    }
}

//! Token lifecycle management.
//!
//! Every manager operation is authorized through the access guard before it
//! touches the store, joining the token through its module → course →
//! institution chain. Secrets are generated here and handed out exactly
//! once, in the creation response.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};

use mentora_access::guard::{AccessGuard, Decision, ResourceRef};
use mentora_access::scope::Scope;
use mentora_core::catalog::Catalog;
use mentora_core::error::{AccessError, Result, TokenError};
use mentora_core::id::{ModuleId, TokenId};

use crate::model::{IssuedToken, ModuleAccessToken, TokenCapabilities, TokenUpdate, TokenView};
use crate::store::TokenStore;

/// Length of a generated secret in raw bytes (hex-encoded to 64 chars).
const SECRET_BYTES: usize = 32;

/// Fields for a token creation request.
#[derive(Clone, Debug)]
pub struct NewToken {
    pub name: String,
    pub description: Option<String>,
    pub capabilities: TokenCapabilities,
    /// Days until expiry; `None` means the token never expires.
    pub expires_in_days: Option<i64>,
}

impl NewToken {
    /// A never-expiring token with the given name and capabilities.
    pub fn named(name: impl Into<String>, capabilities: TokenCapabilities) -> Self {
        Self {
            name: name.into(),
            description: None,
            capabilities,
            expires_in_days: None,
        }
    }
}

/// Creates, lists, updates, and revokes module access tokens.
#[derive(Clone)]
pub struct TokenManager<S, C> {
    store: S,
    guard: AccessGuard<C>,
}

impl<S: TokenStore, C: Catalog> TokenManager<S, C> {
    /// Create a manager over the given store and guard.
    pub fn new(store: S, guard: AccessGuard<C>) -> Self {
        Self { store, guard }
    }

    /// Create a token for `module_id`.
    ///
    /// Multiple live tokens per module are supported; different
    /// distribution channels need independently revocable credentials.
    /// The returned `IssuedToken` is the only place the secret is readable.
    pub fn create(
        &self,
        scope: &Scope,
        module_id: ModuleId,
        request: NewToken,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken> {
        self.ensure_manageable(scope, module_id)?;

        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(TokenError::Validation("token name must not be empty".into()).into());
        }
        let expires_at = match request.expires_in_days {
            Some(days) if days <= 0 => {
                return Err(
                    TokenError::Validation("expiry must be a positive number of days".into()).into(),
                )
            }
            Some(days) => Some(now + Duration::days(days)),
            None => None,
        };

        let token = ModuleAccessToken {
            id: TokenId::generate(),
            module_id,
            secret: generate_secret(),
            name,
            description: request.description,
            capabilities: request.capabilities,
            is_active: true,
            expires_at,
            created_at: now,
        };
        let issued = IssuedToken {
            token: TokenView::from(&token),
            secret: token.secret.clone(),
        };
        self.store.insert(token);
        debug!(token = %issued.token.id, module = %module_id, "token created");
        Ok(issued)
    }

    /// List the tokens visible through `scope`, joined through each token's
    /// module → course → institution chain. Views never include secrets.
    pub fn list(&self, scope: &Scope) -> Result<Vec<TokenView>> {
        let mut views = Vec::new();
        for token in self.store.list_all() {
            let visibility = self
                .guard
                .visibility(scope, &ResourceRef::Module(token.module_id))?;
            if visibility.is_allowed() {
                views.push(TokenView::from(&token));
            }
        }
        Ok(views)
    }

    /// Apply a partial update to a token.
    ///
    /// The module binding is immutable, and an already-expired token's
    /// expiry cannot be changed: an expired token is replaced, never
    /// resurrected. Re-activating a revoked token is permitted but emits an
    /// audit event.
    ///
    /// The patch is applied under the store's single-row atomicity against
    /// the token's current state, so a concurrent revocation is never
    /// overwritten by a stale copy read earlier in this call.
    pub fn update(
        &self,
        scope: &Scope,
        id: &TokenId,
        patch: TokenUpdate,
        now: DateTime<Utc>,
    ) -> Result<TokenView> {
        // The module binding is immutable, so the guard check does not race
        // with the patch below.
        let current = self.store.get(id).ok_or(TokenError::NotFound)?;
        self.ensure_manageable(scope, current.module_id)?;

        let mut regrant = Regrant::None;
        let updated = self.store.update(id, &mut |token| {
            regrant = apply_patch(token, &patch, now)?;
            Ok(())
        })?;

        match regrant {
            Regrant::Revoked => {
                warn!(token = %updated.id, module = %updated.module_id, "revoked token re-activated")
            }
            Regrant::Expired => {
                // The flag flips, but expiry still invalidates the token.
                debug!(token = %updated.id, "re-activation of an expired token has no effect")
            }
            Regrant::None => {}
        }
        Ok(TokenView::from(&updated))
    }

    /// Revoke a token: sugar for `update(is_active = false)`.
    ///
    /// Irreversible from the token-holder's perspective; flipping the
    /// switch back is a new explicit grant decision requiring the same
    /// authorization as any update.
    pub fn revoke(&self, scope: &Scope, id: &TokenId, now: DateTime<Utc>) -> Result<TokenView> {
        self.update(scope, id, TokenUpdate::set_active(false), now)
    }

    /// Hard-delete a token. A separate destructive operation, outside the
    /// normal deactivation lifecycle.
    pub fn delete(&self, scope: &Scope, id: &TokenId) -> Result<()> {
        let token = self.store.get(id).ok_or(TokenError::NotFound)?;
        self.ensure_manageable(scope, token.module_id)?;
        self.store.remove(id)?;
        warn!(token = %id, module = %token.module_id, "token hard-deleted");
        Ok(())
    }

    fn ensure_manageable(&self, scope: &Scope, module_id: ModuleId) -> Result<()> {
        match self.guard.authorize_token_management(scope, module_id)? {
            Decision::Allow => Ok(()),
            Decision::DenyNotFound => Err(AccessError::ScopeViolation.into()),
            Decision::DenyForbidden => Err(AccessError::CapabilityDenied(
                "token management requires an administrative scope".into(),
            )
            .into()),
        }
    }
}

/// What a patch's `is_active` flip amounts to, for the audit trail.
enum Regrant {
    None,
    /// A revoked, still-unexpired token was re-activated: a live re-grant.
    Revoked,
    /// An expired token's flag was flipped; validity is unaffected.
    Expired,
}

/// Apply `patch` to `token`, validating before any field is written so a
/// rejected patch leaves the token untouched.
fn apply_patch(
    token: &mut ModuleAccessToken,
    patch: &TokenUpdate,
    now: DateTime<Utc>,
) -> std::result::Result<Regrant, TokenError> {
    let name = match &patch.name {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(TokenError::Validation("token name must not be empty".into()));
            }
            Some(name.to_string())
        }
        None => None,
    };
    if patch.expires_at.is_some() && token.is_expired(now) {
        return Err(TokenError::Validation(
            "an expired token cannot be extended; issue a replacement".into(),
        ));
    }

    if let Some(name) = name {
        token.name = name;
    }
    if let Some(description) = &patch.description {
        token.description = description.clone();
    }
    if let Some(capabilities) = patch.capabilities {
        token.capabilities = capabilities;
    }
    if let Some(expires_at) = patch.expires_at {
        token.expires_at = expires_at;
    }

    let mut regrant = Regrant::None;
    if let Some(is_active) = patch.is_active {
        if is_active && !token.is_active {
            regrant = if token.is_expired(now) {
                Regrant::Expired
            } else {
                Regrant::Revoked
            };
        }
        token.is_active = is_active;
    }
    Ok(regrant)
}

/// Generate an unguessable token secret: 32 uniformly random bytes from the
/// operating system, hex-encoded. Never sequential or time-derived.
fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

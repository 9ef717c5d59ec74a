//! # Mentora Token
//!
//! `mentora_token` manages the lifecycle of module access tokens: opaque
//! bearer secrets that grant unauthenticated external callers scoped,
//! capability-limited access to exactly one module.
//!
//! Key concepts:
//!
//! 1. **ModuleAccessToken**: bound to one module for its entire lifetime;
//!    valid iff active and not past its optional expiry.
//!
//! 2. **Write-once-readable secrets**: the raw secret is returned exactly
//!    once, in the creation response. Every later read goes through
//!    `TokenView`, which carries no secret.
//!
//! 3. **EffectiveGrant**: the capability snapshot a validated token
//!    confers. The token *is* the scope; no actor resolution is involved.

pub mod authenticator;
pub mod manager;
pub mod model;
pub mod store;

// Re-export key types for convenience
pub use authenticator::TokenAuthenticator;
pub use manager::{NewToken, TokenManager};
pub use model::{EffectiveGrant, IssuedToken, ModuleAccessToken, TokenCapabilities, TokenUpdate, TokenView};
pub use store::{InMemoryTokenStore, TokenStore};

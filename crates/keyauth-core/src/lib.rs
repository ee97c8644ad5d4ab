#![deny(missing_docs)]

//! # keyauth-core: Query-String Key Authentication
//!
//! The authentication decision for the `QueryStringAuth` scheme, free of any
//! HTTP framework. A request is authenticated when the configured query
//! parameter carries a non-blank value; the value becomes the single claim of
//! the resulting identity.
//!
//! ## Design Principles
//!
//! 1. **Pure decision.** [`authenticate`] has no side effects and holds no
//!    state. It is safe to call from any number of tasks at once.
//!
//! 2. **Outcomes are values.** Failure is an [`AuthOutcome::Failure`], not an
//!    error path. [`ConfigError`] is reserved for setup-time mistakes.
//!
//! 3. **Immutable identity.** An [`Identity`] is built in one step and only
//!    exposes read accessors.
//!
//! 4. **Explicit policy.** The authorization requirement is an
//!    [`AuthorizationPolicy`] value handed over at startup.
//!
//! The key is trusted at face value. No credential store, signature, or
//! expiry is consulted.

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod options;
pub mod outcome;
pub mod policy;
pub mod query;

pub use authenticator::{authenticate, Authenticator, QueryKeyAuthenticator};
pub use claims::{Claim, ClaimSet, Identity};
pub use error::{AuthenticationFailure, ConfigError, KEY_NOT_FOUND_OR_NOT_VALID};
pub use options::{
    QueryAuthOptions, DEFAULT_CLAIM_TYPE, DEFAULT_QUERY_PARAM, DEFAULT_SCHEME_NAME,
};
pub use outcome::AuthOutcome;
pub use policy::{AuthorizationPolicy, ClaimRequirement, PolicyBuilder, PolicyDecision};
pub use query::QueryParams;

//! # Query-String Key Authenticator
//!
//! Decides whether a request is authenticated from its query parameters
//! alone:
//!
//! 1. Look up the configured parameter.
//! 2. Missing, or present with no values: fail.
//! 3. First value blank after trimming: fail. Later values are ignored.
//! 4. Otherwise succeed with a single claim holding the raw first value.
//!
//! The blank check trims but the stored claim does not, so `?key=%20abc`
//! authenticates with the claim value `" abc"`.

use std::sync::Arc;

use crate::claims::{Claim, Identity};
use crate::error::AuthenticationFailure;
use crate::options::QueryAuthOptions;
use crate::outcome::AuthOutcome;
use crate::query::QueryParams;

/// Authenticate `params` under `options`.
pub fn authenticate(params: &QueryParams, options: &QueryAuthOptions) -> AuthOutcome {
    let key = match params.first(&options.query_param_name) {
        Some(value) if !value.trim().is_empty() => value,
        _ => return AuthOutcome::Failure(AuthenticationFailure::key_not_found()),
    };

    let identity = Identity::new(
        options.scheme_name.clone(),
        [Claim::new(options.claim_type.clone(), key)],
    );
    AuthOutcome::success(identity)
}

/// An authentication scheme the host pipeline can invoke per request.
pub trait Authenticator: Send + Sync {
    /// Name the scheme is registered under.
    fn scheme(&self) -> &str;

    /// Decide the outcome for one request.
    fn authenticate(&self, params: &QueryParams) -> AuthOutcome;
}

/// [`Authenticator`] bound to a validated set of options.
#[derive(Debug, Clone)]
pub struct QueryKeyAuthenticator {
    options: Arc<QueryAuthOptions>,
}

impl QueryKeyAuthenticator {
    /// Validate `options` and build the authenticator.
    pub fn new(options: QueryAuthOptions) -> Result<Self, crate::ConfigError> {
        options.validate()?;
        Ok(Self {
            options: Arc::new(options),
        })
    }

    /// The options this authenticator was built with.
    pub fn options(&self) -> &QueryAuthOptions {
        &self.options
    }
}

impl Default for QueryKeyAuthenticator {
    fn default() -> Self {
        Self {
            options: Arc::new(QueryAuthOptions::default()),
        }
    }
}

impl Authenticator for QueryKeyAuthenticator {
    fn scheme(&self) -> &str {
        &self.options.scheme_name
    }

    fn authenticate(&self, params: &QueryParams) -> AuthOutcome {
        let outcome = authenticate(params, &self.options);
        match &outcome {
            AuthOutcome::Success(identity) => {
                tracing::debug!(scheme = %identity.scheme(), "query key accepted");
            }
            AuthOutcome::Failure(failure) => {
                tracing::debug!(
                    scheme = %self.options.scheme_name,
                    param = %self.options.query_param_name,
                    reason = %failure,
                    "query key rejected"
                );
            }
        }
        outcome
    }
}

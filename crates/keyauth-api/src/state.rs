//! # Application State
//!
//! Startup configuration shared with handlers. Built once in `main` and
//! read-only afterwards.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use keyauth_core::{AuthorizationPolicy, ConfigError, QueryAuthOptions};

/// Server configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Options for the query-string scheme.
    pub auth: QueryAuthOptions,
    /// Policy enforced on protected routes.
    pub policy: AuthorizationPolicy,
}

/// One-line summary for startup logs: the scheme settings and the claim
/// types the policy requires, without the allowed claim values.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let required: Vec<&str> = self
            .policy
            .required_claims
            .iter()
            .map(|req| req.claim_type.as_str())
            .collect();
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("scheme", &self.auth.scheme_name)
            .field("query_param", &self.auth.query_param_name)
            .field("claim_type", &self.auth.claim_type)
            .field("required_claims", &required)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_options(8080, QueryAuthOptions::default())
    }
}

impl AppConfig {
    /// Config whose policy is the default policy for `auth`.
    pub fn with_options(port: u16, auth: QueryAuthOptions) -> Self {
        let policy = AuthorizationPolicy::default_for(&auth);
        Self { port, auth, policy }
    }

    /// Load scheme options from a JSON file. Missing fields take defaults;
    /// unknown fields are an error.
    pub fn load_options(path: &Path) -> Result<QueryAuthOptions, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        QueryAuthOptions::from_json(&contents)
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

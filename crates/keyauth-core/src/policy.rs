//! # Authorization Policy
//!
//! Claim-based requirements evaluated after authentication. A policy names
//! the claims a caller must hold and, optionally, the schemes allowed to have
//! issued them.
//!
//! The default policy for a scheme requires its claim type, issued by that
//! scheme, with any value.

use serde::{Deserialize, Serialize};

use crate::claims::Identity;
use crate::error::ConfigError;
use crate::options::QueryAuthOptions;

/// A claim the caller must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequirement {
    /// Required claim type.
    pub claim_type: String,
    /// Accepted values. Empty means any value is accepted.
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

impl ClaimRequirement {
    /// Require presence of `claim_type` with any value.
    pub fn any(claim_type: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            allowed_values: Vec::new(),
        }
    }

    fn is_satisfied_by(&self, identity: &Identity) -> bool {
        match identity.claim(&self.claim_type) {
            None => false,
            Some(_) if self.allowed_values.is_empty() => true,
            Some(value) => self.allowed_values.iter().any(|v| v == value),
        }
    }
}

/// Result of evaluating a policy against a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Access granted.
    Allow,
    /// Caller is not authenticated by an accepted scheme (HTTP 401).
    Challenge,
    /// Caller is authenticated but lacks a required claim (HTTP 403).
    Forbid {
        /// The first requirement that was not met.
        missing_claim: String,
    },
}

/// Claims and schemes required to reach a protected handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationPolicy {
    /// Claims the caller must hold.
    pub required_claims: Vec<ClaimRequirement>,
    /// Schemes whose identities are accepted. Empty accepts any scheme.
    #[serde(default)]
    pub schemes: Vec<String>,
}

impl AuthorizationPolicy {
    /// Policy requiring the claim produced by `options`, issued by its scheme.
    pub fn default_for(options: &QueryAuthOptions) -> Self {
        Self {
            required_claims: vec![ClaimRequirement::any(options.claim_type.clone())],
            schemes: vec![options.scheme_name.clone()],
        }
    }

    /// Start building a named-style policy.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Evaluate the policy for a request carrying `identity`.
    pub fn evaluate(&self, identity: Option<&Identity>) -> PolicyDecision {
        let Some(identity) = identity else {
            return PolicyDecision::Challenge;
        };

        if !self.schemes.is_empty() && !self.schemes.iter().any(|s| s == identity.scheme()) {
            return PolicyDecision::Challenge;
        }

        match self
            .required_claims
            .iter()
            .find(|req| !req.is_satisfied_by(identity))
        {
            Some(req) => PolicyDecision::Forbid {
                missing_claim: req.claim_type.clone(),
            },
            None => PolicyDecision::Allow,
        }
    }
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self::default_for(&QueryAuthOptions::default())
    }
}

/// Builder for [`AuthorizationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    required_claims: Vec<ClaimRequirement>,
    schemes: Vec<String>,
}

impl PolicyBuilder {
    /// Require `claim_type` with any value.
    pub fn require_claim(mut self, claim_type: impl Into<String>) -> Self {
        self.required_claims.push(ClaimRequirement::any(claim_type));
        self
    }

    /// Require `claim_type` with one of `values`.
    pub fn require_claim_values<I, V>(mut self, claim_type: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.required_claims.push(ClaimRequirement {
            claim_type: claim_type.into(),
            allowed_values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Accept identities issued by `scheme`.
    pub fn add_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.schemes.push(scheme.into());
        self
    }

    /// Finish the policy. At least one claim must be required.
    pub fn build(self) -> Result<AuthorizationPolicy, ConfigError> {
        if self.required_claims.is_empty() {
            return Err(ConfigError::EmptyPolicy);
        }
        Ok(AuthorizationPolicy {
            required_claims: self.required_claims,
            schemes: self.schemes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claim;

    fn query_identity(value: &str) -> Identity {
        Identity::new("QueryStringAuth", [Claim::new("QueryStringKey", value)])
    }

    #[test]
    fn default_policy_requires_query_claim_and_scheme() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(policy.schemes, ["QueryStringAuth"]);
        assert_eq!(policy.required_claims, [ClaimRequirement::any("QueryStringKey")]);
    }

    #[test]
    fn default_policy_allows_query_identity() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(
            policy.evaluate(Some(&query_identity("abc"))),
            PolicyDecision::Allow
        );
    }

    #[test]
    fn no_identity_is_challenged() {
        assert_eq!(
            AuthorizationPolicy::default().evaluate(None),
            PolicyDecision::Challenge
        );
    }

    #[test]
    fn foreign_scheme_is_challenged() {
        let identity = Identity::new("Bearer", [Claim::new("QueryStringKey", "abc")]);
        assert_eq!(
            AuthorizationPolicy::default().evaluate(Some(&identity)),
            PolicyDecision::Challenge
        );
    }

    #[test]
    fn missing_claim_is_forbidden() {
        let identity = Identity::new("QueryStringAuth", [Claim::new("Other", "abc")]);
        assert_eq!(
            AuthorizationPolicy::default().evaluate(Some(&identity)),
            PolicyDecision::Forbid {
                missing_claim: "QueryStringKey".to_string()
            }
        );
    }

    #[test]
    fn default_for_custom_options() {
        let options = QueryAuthOptions::default()
            .with_claim_type("ApiKey")
            .with_scheme_name("ApiKeyAuth");
        let policy = AuthorizationPolicy::default_for(&options);
        let identity = Identity::new("ApiKeyAuth", [Claim::new("ApiKey", "k")]);
        assert_eq!(policy.evaluate(Some(&identity)), PolicyDecision::Allow);
    }

    #[test]
    fn builder_with_allowed_values() {
        let policy = AuthorizationPolicy::builder()
            .require_claim_values("QueryStringKey", ["alpha", "beta"])
            .add_scheme("QueryStringAuth")
            .build()
            .unwrap();

        assert_eq!(
            policy.evaluate(Some(&query_identity("alpha"))),
            PolicyDecision::Allow
        );
        assert!(matches!(
            policy.evaluate(Some(&query_identity("gamma"))),
            PolicyDecision::Forbid { .. }
        ));
    }

    #[test]
    fn builder_without_schemes_accepts_any_scheme() {
        let policy = AuthorizationPolicy::builder()
            .require_claim("QueryStringKey")
            .build()
            .unwrap();
        let identity = Identity::new("Anything", [Claim::new("QueryStringKey", "x")]);
        assert_eq!(policy.evaluate(Some(&identity)), PolicyDecision::Allow);
    }

    #[test]
    fn empty_builder_rejected() {
        assert_eq!(
            AuthorizationPolicy::builder().build().unwrap_err(),
            ConfigError::EmptyPolicy
        );
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: AuthorizationPolicy =
            serde_json::from_str(r#"{"required_claims":[{"claim_type":"QueryStringKey"}]}"#)
                .unwrap();
        assert!(policy.schemes.is_empty());
        assert!(policy.required_claims[0].allowed_values.is_empty());
    }
}

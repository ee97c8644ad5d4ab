//! # Claims and Identity
//!
//! A [`ClaimSet`] maps claim types to values. An [`Identity`] pairs a claim
//! set with the scheme that produced it. Both are built in one step and are
//! read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single named fact about an identity.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Claim {
    /// Claim type, e.g. `QueryStringKey`.
    pub claim_type: String,
    /// Claim value.
    pub value: String,
}

impl Claim {
    /// Create a claim.
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

// Claim values may be credentials; keep them out of logs.
impl fmt::Debug for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claim")
            .field("claim_type", &self.claim_type)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Immutable mapping of claim type to claim value.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: BTreeMap<String, String>,
}

impl ClaimSet {
    /// Value of the claim with the given type.
    pub fn get(&self, claim_type: &str) -> Option<&str> {
        self.claims.get(claim_type).map(String::as_str)
    }

    /// Whether a claim of the given type is present.
    pub fn has(&self, claim_type: &str) -> bool {
        self.claims.contains_key(claim_type)
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// True when there are no claims.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate claims in claim-type order.
    pub fn iter(&self) -> impl Iterator<Item = Claim> + '_ {
        self.claims
            .iter()
            .map(|(claim_type, value)| Claim::new(claim_type.clone(), value.clone()))
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self {
            claims: iter
                .into_iter()
                .map(|claim| (claim.claim_type, claim.value))
                .collect(),
        }
    }
}

impl fmt::Debug for ClaimSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.claims.keys()).finish()
    }
}

/// An authenticated identity: the claims plus the scheme that issued them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    scheme: String,
    claims: ClaimSet,
}

impl Identity {
    /// Build an identity from a scheme name and its claims.
    pub fn new(scheme: impl Into<String>, claims: impl IntoIterator<Item = Claim>) -> Self {
        Self {
            scheme: scheme.into(),
            claims: claims.into_iter().collect(),
        }
    }

    /// Scheme that authenticated this identity.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The identity's claims.
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Shorthand for `claims().get(claim_type)`.
    pub fn claim(&self, claim_type: &str) -> Option<&str> {
        self.claims.get(claim_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_exposes_scheme_and_claims() {
        let identity = Identity::new("QueryStringAuth", [Claim::new("QueryStringKey", "abc")]);
        assert_eq!(identity.scheme(), "QueryStringAuth");
        assert_eq!(identity.claim("QueryStringKey"), Some("abc"));
        assert_eq!(identity.claims().len(), 1);
        assert!(identity.claims().has("QueryStringKey"));
        assert!(!identity.claims().has("Other"));
    }

    #[test]
    fn claim_set_iterates_in_type_order() {
        let set: ClaimSet = [Claim::new("b", "2"), Claim::new("a", "1")]
            .into_iter()
            .collect();
        let types: Vec<String> = set.iter().map(|c| c.claim_type).collect();
        assert_eq!(types, ["a", "b"]);
    }

    #[test]
    fn debug_output_redacts_values() {
        let claim = Claim::new("QueryStringKey", "super-secret");
        let rendered = format!("{claim:?}");
        assert!(rendered.contains("QueryStringKey"));
        assert!(!rendered.contains("super-secret"));

        let identity = Identity::new("QueryStringAuth", [claim]);
        let rendered = format!("{identity:?}");
        assert!(rendered.contains("QueryStringKey"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn serializes_claims_as_object() {
        let identity = Identity::new("QueryStringAuth", [Claim::new("QueryStringKey", "abc")]);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["scheme"], "QueryStringAuth");
        assert_eq!(json["claims"]["QueryStringKey"], "abc");
    }

    #[test]
    fn empty_claim_set() {
        let set = ClaimSet::default();
        assert!(set.is_empty());
        assert_eq!(set.get("anything"), None);
    }
}

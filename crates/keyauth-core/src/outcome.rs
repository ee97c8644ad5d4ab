//! # Authentication Outcome

use crate::claims::Identity;
use crate::error::AuthenticationFailure;

/// Result of one authentication attempt.
///
/// A `Failure` never carries an identity. The scheme of a `Success` is read
/// from its identity, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The request is authenticated as this identity.
    Success(Identity),
    /// The request is not authenticated.
    Failure(AuthenticationFailure),
}

impl AuthOutcome {
    /// Successful outcome for `identity`.
    pub fn success(identity: Identity) -> Self {
        Self::Success(identity)
    }

    /// Whether the request was authenticated.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The identity, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Success(identity) => Some(identity),
            Self::Failure(_) => None,
        }
    }

    /// Scheme that authenticated the request, if any.
    pub fn scheme(&self) -> Option<&str> {
        self.identity().map(Identity::scheme)
    }

    /// The failure reason, if rejected.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.reason()),
        }
    }

    /// Convert into a `Result`, handing the identity over on success.
    pub fn into_result(self) -> Result<Identity, AuthenticationFailure> {
        match self {
            Self::Success(identity) => Ok(identity),
            Self::Failure(failure) => Err(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claim;

    #[test]
    fn success_scheme_comes_from_identity() {
        let identity = Identity::new("QueryStringAuth", [Claim::new("t", "v")]);
        let outcome = AuthOutcome::Success(identity.clone());
        assert!(outcome.is_success());
        assert_eq!(outcome.scheme(), Some("QueryStringAuth"));
        assert_eq!(outcome.scheme(), outcome.identity().map(Identity::scheme));
        assert_eq!(outcome, AuthOutcome::success(identity));
        assert_eq!(outcome.failure_reason(), None);
    }

    #[test]
    fn failure_has_no_identity() {
        let outcome = AuthOutcome::Failure(AuthenticationFailure::key_not_found());
        assert!(!outcome.is_success());
        assert!(outcome.identity().is_none());
        assert!(outcome.scheme().is_none());
        assert_eq!(
            outcome.failure_reason(),
            Some("Key not found or not valid")
        );
        assert!(outcome.into_result().is_err());
    }
}

//! # Authentication & Authorization Middleware
//!
//! Query-string key authentication for protected routes, followed by a
//! claim-based authorization check.
//!
//! ## Request Flow
//!
//! ```text
//! query_auth_middleware → authorize_middleware → Handler
//! ```
//!
//! The authentication middleware reads the registered [`Authenticator`] from
//! request extensions, runs it against the URI query, and either injects an
//! [`AuthenticatedIdentity`] or answers 401. The authorization middleware
//! evaluates the configured [`AuthorizationPolicy`] against that identity.
//!
//! ## Registration
//!
//! [`QueryStringAuthExt`] adds the layers to a `Router` in one of three ways:
//! defaults, a closure over the defaults, or a complete options value. Each
//! validates the options before any request is served.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, HeaderValue};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Router};

use keyauth_core::{
    AuthOutcome, Authenticator, AuthorizationPolicy, ConfigError, Identity, PolicyDecision,
    QueryAuthOptions, QueryKeyAuthenticator, QueryParams,
};

use crate::error::AppError;

// ── CallerIdentity ──────────────────────────────────────────────────────────

/// Identity of the authenticated caller, injected by [`query_auth_middleware`]
/// and available to handlers through `FromRequestParts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity(pub Arc<Identity>);

impl AuthenticatedIdentity {
    /// The underlying identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

/// Returns 401 when no identity is present (middleware didn't run or failed).
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for AuthenticatedIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("no caller identity in request context".into()))
    }
}

// ── Scheme registration ─────────────────────────────────────────────────────

/// The authenticator registered for a router, shared by every request.
#[derive(Clone)]
pub struct RegisteredScheme(pub Arc<dyn Authenticator>);

impl std::fmt::Debug for RegisteredScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredScheme")
            .field("scheme", &self.0.scheme())
            .finish()
    }
}

/// Router extension that registers query-string authentication.
pub trait QueryStringAuthExt: Sized {
    /// Register with default options (`key` → `QueryStringKey`, scheme `QueryStringAuth`).
    fn use_query_string_authentication(self) -> Result<Self, ConfigError> {
        self.use_query_string_authentication_options(QueryAuthOptions::default())
    }

    /// Register with the defaults modified by `configure`.
    fn use_query_string_authentication_with<F>(self, configure: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&mut QueryAuthOptions),
    {
        self.use_query_string_authentication_options(QueryAuthOptions::configured(configure))
    }

    /// Register with a complete options value.
    fn use_query_string_authentication_options(
        self,
        options: QueryAuthOptions,
    ) -> Result<Self, ConfigError>;

    /// Require `policy` for every route of this router. Must be added before
    /// the authentication layer so authentication runs first.
    fn require_authorization(self, policy: AuthorizationPolicy) -> Self;
}

impl<S> QueryStringAuthExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn use_query_string_authentication_options(
        self,
        options: QueryAuthOptions,
    ) -> Result<Self, ConfigError> {
        let authenticator = QueryKeyAuthenticator::new(options)?;
        tracing::info!(
            scheme = %authenticator.scheme(),
            param = %authenticator.options().query_param_name,
            claim_type = %authenticator.options().claim_type,
            "query string authentication registered"
        );
        let scheme = RegisteredScheme(Arc::new(authenticator));
        Ok(self
            .layer(from_fn(query_auth_middleware))
            .layer(Extension(scheme)))
    }

    fn require_authorization(self, policy: AuthorizationPolicy) -> Self {
        self.layer(from_fn(authorize_middleware))
            .layer(Extension(Arc::new(policy)))
    }
}

// ── Middleware ───────────────────────────────────────────────────────────────

/// Authenticate the request from its query string.
///
/// On success the identity is inserted into request extensions. On failure
/// the request is answered with 401 and the failure reason.
pub async fn query_auth_middleware(mut request: Request, next: Next) -> Response {
    let Some(RegisteredScheme(authenticator)) =
        request.extensions().get::<RegisteredScheme>().cloned()
    else {
        return AppError::Internal("query auth middleware installed without a scheme".into())
            .into_response();
    };

    let params = QueryParams::from_optional(request.uri().query());

    match authenticator.authenticate(&params) {
        AuthOutcome::Success(identity) => {
            request
                .extensions_mut()
                .insert(AuthenticatedIdentity(Arc::new(identity)));
            next.run(request).await
        }
        AuthOutcome::Failure(failure) => {
            tracing::warn!(
                scheme = %authenticator.scheme(),
                path = %request.uri().path(),
                reason = %failure,
                "authentication failed"
            );
            challenge_response(authenticator.scheme(), AppError::from(failure))
        }
    }
}

/// Evaluate the configured policy against the caller's identity.
pub async fn authorize_middleware(request: Request, next: Next) -> Response {
    let Some(policy) = request
        .extensions()
        .get::<Arc<AuthorizationPolicy>>()
        .cloned()
    else {
        return AppError::Internal("authorization middleware installed without a policy".into())
            .into_response();
    };

    let identity = request
        .extensions()
        .get::<AuthenticatedIdentity>()
        .map(|caller| Arc::clone(&caller.0));

    match policy.evaluate(identity.as_deref()) {
        PolicyDecision::Allow => next.run(request).await,
        PolicyDecision::Challenge => {
            tracing::warn!(
                path = %request.uri().path(),
                "authorization challenge: no accepted identity"
            );
            let scheme = policy.schemes.first().map(String::as_str).unwrap_or_default();
            challenge_response(scheme, AppError::Unauthorized("authentication required".into()))
        }
        PolicyDecision::Forbid { missing_claim } => {
            tracing::warn!(
                path = %request.uri().path(),
                claim = %missing_claim,
                "authorization denied: required claim not satisfied"
            );
            AppError::Forbidden(format!("claim '{missing_claim}' required")).into_response()
        }
    }
}

/// Render `error` and name `scheme` in `WWW-Authenticate`.
fn challenge_response(scheme: &str, error: AppError) -> Response {
    let mut response = error.into_response();
    if scheme.is_empty() {
        return response;
    }
    if let Ok(value) = HeaderValue::from_str(scheme) {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, value);
    }
    response
}

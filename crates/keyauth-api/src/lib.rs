//! # keyauth-api: Axum Host for Query-String Key Authentication
//!
//! Mounts sample resources behind the `QueryStringAuth` scheme. A request
//! is authenticated when the configured query parameter (default `key`)
//! carries a non-blank value, and authorized when the resulting identity
//! satisfies the configured policy (default: claim `QueryStringKey` issued
//! by `QueryStringAuth`).
//!
//! ## API Surface
//!
//! | Route                   | Auth      | Module                  |
//! |-------------------------|-----------|-------------------------|
//! | `/api/values`           | protected | [`routes::values`]      |
//! | `/api/values/:id`       | protected | [`routes::values`]      |
//! | `/api/whoami`           | protected | [`routes::values`]      |
//! | `/health/liveness`      | public    | this module             |
//! | `/health/readiness`     | public    | this module             |
//! | `/openapi.json`         | public    | [`openapi`]             |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → query_auth_middleware → authorize_middleware → Handler
//! ```

pub mod auth;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;

use keyauth_core::ConfigError;

use crate::auth::QueryStringAuthExt;
use crate::state::AppState;

pub use error::AppError;

/// Assemble the full application router.
///
/// Health checks and `/openapi.json` are mounted outside the auth layers so
/// they remain reachable without a key. Fails if the configured options are
/// invalid.
pub fn app(state: AppState) -> Result<Router, ConfigError> {
    let config = state.config.clone();

    // Authorization is layered first so authentication wraps it and runs first.
    let protected = routes::values::router()
        .require_authorization(config.policy.clone())
        .use_query_string_authentication_options(config.auth.clone())?
        .with_state(state.clone());

    let unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .merge(openapi::router())
        .with_state(state);

    Ok(Router::new()
        .merge(unauthenticated)
        .merge(protected)
        .layer(middleware::tracing_layer::layer()))
}

/// Liveness check: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check: options were validated when the router was built, so a
/// serving process is ready.
async fn readiness() -> &'static str {
    "ready"
}

//! # Values API
//!
//! Sample resources guarded by the default policy, plus `/api/whoami` which
//! echoes the caller's scheme and claims.

use std::collections::BTreeMap;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity as seen by the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WhoAmIResponse {
    /// Scheme that authenticated the request.
    pub scheme: String,
    /// Claims attached to the identity.
    pub claims: BTreeMap<String, String>,
}

/// Build the values router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/values", get(list_values))
        .route("/api/values/:id", get(get_value))
        .route("/api/whoami", get(whoami))
}

/// GET /api/values: List sample values.
#[utoipa::path(
    get,
    path = "/api/values",
    responses(
        (status = 200, description = "Sample values", body = [String]),
        (status = 401, description = "Missing or blank key", body = crate::error::ErrorBody),
    ),
    security(("QueryStringAuth" = [])),
    tag = "values"
)]
pub(crate) async fn list_values() -> Json<Vec<&'static str>> {
    Json(vec!["value1", "value2"])
}

/// GET /api/values/{id}: Fetch one sample value.
#[utoipa::path(
    get,
    path = "/api/values/{id}",
    params(("id" = i64, Path, description = "Value ID")),
    responses(
        (status = 200, description = "Sample value", body = String),
        (status = 401, description = "Missing or blank key", body = crate::error::ErrorBody),
        (status = 404, description = "Negative ID", body = crate::error::ErrorBody),
    ),
    security(("QueryStringAuth" = [])),
    tag = "values"
)]
pub(crate) async fn get_value(Path(id): Path<i64>) -> Result<Json<&'static str>, AppError> {
    if id < 0 {
        return Err(AppError::NotFound(format!("value {id}")));
    }
    Ok(Json("value"))
}

/// GET /api/whoami: Echo the caller's identity.
#[utoipa::path(
    get,
    path = "/api/whoami",
    responses(
        (status = 200, description = "Caller identity", body = WhoAmIResponse),
        (status = 401, description = "Missing or blank key", body = crate::error::ErrorBody),
    ),
    security(("QueryStringAuth" = [])),
    tag = "values"
)]
pub(crate) async fn whoami(caller: AuthenticatedIdentity) -> Json<WhoAmIResponse> {
    let identity = caller.identity();
    Json(WhoAmIResponse {
        scheme: identity.scheme().to_string(),
        claims: identity
            .claims()
            .iter()
            .map(|claim| (claim.claim_type, claim.value))
            .collect(),
    })
}

//! # OpenAPI Specification Assembly
//!
//! Assembles the documented routes into one OpenAPI spec served at
//! `/openapi.json`. The query-key security scheme is filled in from the
//! running configuration so the documented parameter name is the one the
//! server actually reads.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityRequirement, SecurityScheme};
use utoipa::OpenApi;

use keyauth_core::QueryAuthOptions;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "KeyAuth API: Query-String Key Authentication",
        version = "0.1.0",
        description = "Sample resources protected by a key passed in the query string.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::values::list_values,
        crate::routes::values::get_value,
        crate::routes::values::whoami,
    ),
    components(schemas(
        crate::routes::values::WhoAmIResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "values", description = "Protected sample resources"),
    )
)]
pub struct ApiDoc;

/// The spec with the security scheme for `options`.
///
/// Every secured operation is pointed at `options.scheme_name`, so the
/// references always resolve to the scheme defined under `components`.
pub fn spec_for(options: &QueryAuthOptions) -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    for item in spec.paths.paths.values_mut() {
        for operation in item.operations.values_mut() {
            if operation.security.is_some() {
                operation.security = Some(vec![SecurityRequirement::new(
                    options.scheme_name.clone(),
                    Vec::<String>::new(),
                )]);
            }
        }
    }
    let components = spec.components.get_or_insert_with(Default::default);
    components.add_security_scheme(
        options.scheme_name.clone(),
        SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new(
            options.query_param_name.clone(),
        ))),
    );
    spec
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(spec_for(&state.config.auth))
}

//! # Scheme Options
//!
//! Which query parameter to read, which claim type to record it under, and
//! the scheme name the authenticator registers as. Options are validated
//! once at registration and are read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default name of the query-string parameter carrying the key.
pub const DEFAULT_QUERY_PARAM: &str = "key";

/// Default claim type under which the key is recorded.
pub const DEFAULT_CLAIM_TYPE: &str = "QueryStringKey";

/// Default scheme name.
pub const DEFAULT_SCHEME_NAME: &str = "QueryStringAuth";

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

fn default_claim_type() -> String {
    DEFAULT_CLAIM_TYPE.to_string()
}

fn default_scheme_name() -> String {
    DEFAULT_SCHEME_NAME.to_string()
}

/// Options for the query-string key scheme.
///
/// Every field has a default, so a partial JSON document such as
/// `{"query_param_name": "token"}` is a complete configuration. Unknown keys
/// are rejected rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryAuthOptions {
    /// Query-string key to read.
    #[serde(default = "default_query_param")]
    pub query_param_name: String,
    /// Claim type the extracted value is recorded under.
    #[serde(default = "default_claim_type")]
    pub claim_type: String,
    /// Identifier the authenticator registers under.
    #[serde(default = "default_scheme_name")]
    pub scheme_name: String,
}

impl Default for QueryAuthOptions {
    fn default() -> Self {
        Self {
            query_param_name: default_query_param(),
            claim_type: default_claim_type(),
            scheme_name: default_scheme_name(),
        }
    }
}

impl QueryAuthOptions {
    /// Start from the defaults and apply `configure`.
    pub fn configured(configure: impl FnOnce(&mut Self)) -> Self {
        let mut options = Self::default();
        configure(&mut options);
        options
    }

    /// Parse options from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Replace the query parameter name.
    pub fn with_query_param(mut self, name: impl Into<String>) -> Self {
        self.query_param_name = name.into();
        self
    }

    /// Replace the claim type.
    pub fn with_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.claim_type = claim_type.into();
        self
    }

    /// Replace the scheme name.
    pub fn with_scheme_name(mut self, scheme: impl Into<String>) -> Self {
        self.scheme_name = scheme.into();
        self
    }

    /// Reject blank names. Called by every registration path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("query_param_name", &self.query_param_name),
            ("claim_type", &self.claim_type),
            ("scheme_name", &self.scheme_name),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::BlankOption { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scheme_constants() {
        let options = QueryAuthOptions::default();
        assert_eq!(options.query_param_name, "key");
        assert_eq!(options.claim_type, "QueryStringKey");
        assert_eq!(options.scheme_name, "QueryStringAuth");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn configured_applies_closure_to_defaults() {
        let options = QueryAuthOptions::configured(|o| o.query_param_name = "token".into());
        assert_eq!(options.query_param_name, "token");
        assert_eq!(options.claim_type, DEFAULT_CLAIM_TYPE);
        assert_eq!(options.scheme_name, DEFAULT_SCHEME_NAME);
    }

    #[test]
    fn builder_methods_replace_fields() {
        let options = QueryAuthOptions::default()
            .with_query_param("api_key")
            .with_claim_type("ApiKey")
            .with_scheme_name("ApiKeyAuth");
        assert_eq!(options.query_param_name, "api_key");
        assert_eq!(options.claim_type, "ApiKey");
        assert_eq!(options.scheme_name, "ApiKeyAuth");
    }

    #[test]
    fn blank_fields_rejected() {
        let err = QueryAuthOptions::default()
            .with_query_param("  ")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::BlankOption {
                field: "query_param_name"
            }
        );

        let err = QueryAuthOptions::default()
            .with_claim_type("")
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::BlankOption { field: "claim_type" });

        let err = QueryAuthOptions::default()
            .with_scheme_name("\t")
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::BlankOption { field: "scheme_name" });
    }

    #[test]
    fn partial_json_fills_defaults() {
        let options = QueryAuthOptions::from_json(r#"{"query_param_name":"token"}"#).unwrap();
        assert_eq!(options.query_param_name, "token");
        assert_eq!(options.claim_type, "QueryStringKey");
        assert_eq!(options.scheme_name, "QueryStringAuth");
    }

    #[test]
    fn empty_json_object_is_default() {
        let options = QueryAuthOptions::from_json("{}").unwrap();
        assert_eq!(options, QueryAuthOptions::default());
    }

    #[test]
    fn json_with_blank_field_rejected() {
        let err = QueryAuthOptions::from_json(r#"{"scheme_name":""}"#).unwrap_err();
        assert_eq!(err, ConfigError::BlankOption { field: "scheme_name" });
    }

    #[test]
    fn unknown_json_keys_rejected() {
        let err = QueryAuthOptions::from_json(r#"{"queryParamName":"token"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
        assert!(err.to_string().contains("queryParamName"));

        let err = QueryAuthOptions::from_json(r#"{"query_param":"token"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = QueryAuthOptions::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }
}

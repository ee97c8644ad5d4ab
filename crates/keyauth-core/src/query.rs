//! # Query Parameters
//!
//! Multimap view of a URL query string. A key may appear any number of
//! times; values keep the order they had in the request.

use std::collections::HashMap;

/// Parsed query-string parameters, `name → [values...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (without the leading `?`) using
    /// `application/x-www-form-urlencoded` rules.
    ///
    /// A bare name such as `?key` yields a single empty value.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.append(name.into_owned(), value.into_owned());
        }
        params
    }

    /// Parse an optional query string, as returned by `Uri::query()`.
    pub fn from_optional(query: Option<&str>) -> Self {
        query.map(Self::parse).unwrap_or_default()
    }

    /// Append a value for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Register `name` with no values.
    pub fn insert_empty(&mut self, name: impl Into<String>) {
        self.values.entry(name.into()).or_default();
    }

    /// Whether `name` was present at all.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// All values for `name`; empty when absent.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no names are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.append(name, value);
        }
        params
    }
}

//! Request DTOs for the joke API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;
use serde_json::Value;

use crate::models::JokeFields;

/// Request body for adding or editing a joke (POST /jokes, PUT /jokes/:id)
///
/// Fields are optional at the serde level so that a missing field is reported
/// with the API's own message instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JokeRequest {
    #[serde(rename = "type", default)]
    pub joke_type: Option<String>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub punchline: Option<String>,
}

impl JokeRequest {
    /// Error message for a request missing any of the three fields.
    pub const MISSING_FIELDS: &str = "Missing required fields: type, setup, punchline";

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());

        if present(&self.joke_type) && present(&self.setup) && present(&self.punchline) {
            None
        } else {
            Some(Self::MISSING_FIELDS.to_string())
        }
    }

    /// Converts a request that passed [`validate`](Self::validate) into joke fields.
    pub fn into_fields(self) -> JokeFields {
        JokeFields {
            joke_type: self.joke_type.unwrap_or_default(),
            setup: self.setup.unwrap_or_default(),
            punchline: self.punchline.unwrap_or_default(),
        }
    }
}

/// Request body for rating a joke (POST /jokes/:id/rate)
///
/// `value` is kept as raw JSON so strings, null and missing values can be
/// rejected with the same message as out-of-range numbers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateRequest {
    #[serde(default)]
    pub value: Value,
}

impl RateRequest {
    /// The vote as a number, if it is one.
    pub fn vote(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// Query string for GET /jokes/search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    /// The trimmed search term, if one was given.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Field the joke listing is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Setup,
    Type,
    Rating,
}

/// Sort direction of the joke listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query string for GET /jokes
///
/// `type=all` or no type lists every joke.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type", default)]
    pub joke_type: Option<String>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub order: SortDirection,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(rename = "pageSize", default)]
    pub page_size: Option<usize>,
}

impl ListParams {
    pub const DEFAULT_PAGE_SIZE: usize = 10;
    pub const MAX_PAGE_SIZE: usize = 100;

    /// The type to filter by, treating `all` as no filter.
    pub fn type_filter(&self) -> Option<&str> {
        self.joke_type
            .as_deref()
            .filter(|t| !t.is_empty() && *t != "all")
    }

    /// 1-based page number.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }
}

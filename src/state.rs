//! The table widget's persisted state, read back from its cookie.
//!
//! Only `aoSearchCols` matters here; sorting and paging fields are parsed so
//! a well-formed blob deserializes, and are otherwise ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FilterError;

/// Search state of one column as stored by the table widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchColumn {
    #[serde(rename = "sSearch", default)]
    pub search: String,
    #[serde(rename = "bRegex", default)]
    pub regex: bool,
    #[serde(rename = "bSmart", default)]
    pub smart: bool,
    #[serde(rename = "bCaseInsensitive", default)]
    pub case_insensitive: bool,
}

/// A column index paired with its stored token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDescriptor<'a> {
    pub index: usize,
    pub token: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(rename = "aoSearchCols")]
    pub search_cols: Vec<SearchColumn>,
    #[serde(rename = "aaSorting", default)]
    pub sorting: Vec<serde_json::Value>,
    #[serde(rename = "iStart", default)]
    pub start: Option<u64>,
    #[serde(rename = "iEnd", default)]
    pub end: Option<u64>,
    #[serde(rename = "iLength", default)]
    pub length: Option<u64>,
}

impl PersistedState {
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let parsed: Option<Self> = serde_json::from_str(json)
            .map_err(|e| FilterError::MalformedPersistedState(e.to_string()))?;
        parsed.ok_or_else(|| FilterError::MalformedPersistedState("state is null".to_string()))
    }

    /// Parse a raw (percent-encoded) cookie value.
    pub fn from_cookie_value(raw: &str) -> Result<Self, FilterError> {
        let decoded = urlencoding::decode(raw)
            .map_err(|e| FilterError::MalformedPersistedState(e.to_string()))?;
        Self::from_json(&decoded)
    }

    /// Locate cookie `name` in a `Cookie` header string and parse it.
    pub fn from_cookie_header(header: &str, name: &str) -> Result<Self, FilterError> {
        let raw = parse_cookie_value(header, name).ok_or_else(|| {
            FilterError::MalformedPersistedState(format!("cookie {name:?} not found"))
        })?;
        if raw.is_empty() {
            return Err(FilterError::MalformedPersistedState(format!(
                "cookie {name:?} is empty"
            )));
        }
        Self::from_cookie_value(&raw)
    }

    /// Stored tokens in column order
    pub fn descriptors(&self) -> impl Iterator<Item = SearchDescriptor<'_>> {
        self.search_cols
            .iter()
            .enumerate()
            .map(|(index, col)| SearchDescriptor {
                index,
                token: col.search.as_str(),
            })
    }

    pub fn token(&self, column: usize) -> Option<&str> {
        self.search_cols.get(column).map(|c| c.search.as_str())
    }
}

/// Parses a cookie value from a cookie string.
///
/// The cookie string format is: "name1=value1; name2=value2; ..."
pub fn parse_cookie_value(cookie_str: &str, name: &str) -> Option<String> {
    cookie_str
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Identity of a table page: `"{prefix}{namespace}_{view}"`, with `:` and `.`
/// replaced so the result is safe inside a cookie name.
pub fn table_id(prefix: &str, view_name: &str, namespace: Option<&str>) -> String {
    let id = match namespace {
        Some(ns) if !ns.is_empty() => format!("{prefix}{ns}_{view_name}"),
        _ => format!("{prefix}{view_name}"),
    };
    id.replace([':', '.'], "_")
}

/// User segment of the cookie name when no one is logged in
pub const ANONYMOUS_USER: &str = "None";

/// Cookie holding the persisted state of `table_id` for `user`.
pub fn cookie_name(prefix: &str, user: impl fmt::Display, table_id: &str) -> String {
    format!("{prefix}{user}_{table_id}_")
}

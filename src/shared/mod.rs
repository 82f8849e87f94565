//! Shared newtypes and utilities used across all domain modules.
//!
//! `ViewMode` and `Query` serialize to exactly the strings the server and the
//! address bar use, so they can travel between layers without conversion.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── ViewMode ────────────────────────────────────────────────────────────────

/// Whether the page shows a paginated table or a time-series chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Table,
    Chart,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Chart => "chart",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = std::convert::Infallible;

    /// Anything other than `"chart"` falls back to the table view.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("chart") {
            Ok(ViewMode::Chart)
        } else {
            Ok(ViewMode::Table)
        }
    }
}

impl Serialize for ViewMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

// ─── InitialPage ─────────────────────────────────────────────────────────────

/// Page state supplied by the server-rendered HTML at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialPage {
    pub current_page: u32,
    pub mode: ViewMode,
}

impl Default for InitialPage {
    fn default() -> Self {
        Self {
            current_page: 1,
            mode: ViewMode::Table,
        }
    }
}

impl InitialPage {
    /// Parse the `data-current-page` and `data-initial-value` attributes.
    ///
    /// A missing, non-numeric or non-positive page becomes 1.
    pub fn from_attributes(current_page: Option<&str>, initial_mode: Option<&str>) -> Self {
        let current_page = current_page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(clamp_page)
            .unwrap_or(1);
        let mode = initial_mode
            .map(|m| m.parse().unwrap_or_default())
            .unwrap_or_default();
        Self { current_page, mode }
    }
}

/// Clamp any signed page number into the valid `1..=u32::MAX` range.
pub fn clamp_page(page: i64) -> u32 {
    page.clamp(1, u32::MAX as i64) as u32
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Ordered request parameters.
///
/// Insertion order is preserved so the rendered query string, and therefore
/// the synced address, is deterministic. Two equal queries describe the same
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.params.iter().map(|(k, _)| *k).collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `key=value&...` with percent-encoded values.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path?query`, or just `path` when there are no parameters.
    pub fn to_url(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("chart".parse::<ViewMode>().unwrap(), ViewMode::Chart);
        assert_eq!(" Chart ".parse::<ViewMode>().unwrap(), ViewMode::Chart);
        assert_eq!("table".parse::<ViewMode>().unwrap(), ViewMode::Table);
        assert_eq!("".parse::<ViewMode>().unwrap(), ViewMode::Table);
        assert_eq!("graph".parse::<ViewMode>().unwrap(), ViewMode::Table);
    }

    #[test]
    fn test_view_mode_serde() {
        let json = serde_json::to_string(&ViewMode::Chart).unwrap();
        assert_eq!(json, "\"chart\"");
        let back: ViewMode = serde_json::from_str("\"table\"").unwrap();
        assert_eq!(back, ViewMode::Table);
    }

    #[test]
    fn test_initial_page_clamps() {
        let p = InitialPage::from_attributes(Some("0"), Some("table"));
        assert_eq!(p.current_page, 1);
        let p = InitialPage::from_attributes(Some("-4"), None);
        assert_eq!(p.current_page, 1);
        let p = InitialPage::from_attributes(Some("abc"), None);
        assert_eq!(p.current_page, 1);
        let p = InitialPage::from_attributes(None, None);
        assert_eq!(p, InitialPage::default());
    }

    #[test]
    fn test_initial_page_reads_values() {
        let p = InitialPage::from_attributes(Some(" 7 "), Some("chart"));
        assert_eq!(p.current_page, 7);
        assert_eq!(p.mode, ViewMode::Chart);
    }

    #[test]
    fn test_query_preserves_order_and_replaces() {
        let mut q = Query::new();
        q.set("page", 1).set("recordsPerPage", 20).set("page", 3);
        assert_eq!(q.keys(), vec!["page", "recordsPerPage"]);
        assert_eq!(q.get("page"), Some("3"));
        assert_eq!(q.to_query_string(), "page=3&recordsPerPage=20");
    }

    #[test]
    fn test_query_encodes_values() {
        let mut q = Query::new();
        q.set("selectedCurrencyPair", "BTC/DCR");
        assert_eq!(q.to_query_string(), "selectedCurrencyPair=BTC%2FDCR");
        assert_eq!(q.to_url("/exchanges"), "/exchanges?selectedCurrencyPair=BTC%2FDCR");
    }

    #[test]
    fn test_query_empty_url_is_path() {
        assert_eq!(Query::new().to_url("/mempool"), "/mempool");
    }

    #[test]
    fn test_equal_queries_are_equal_requests() {
        let mut a = Query::new();
        a.set("page", 1).set("viewOption", "table");
        let mut b = Query::new();
        b.set("page", "1").set("viewOption", ViewMode::Table);
        assert_eq!(a, b);
    }
}

//! Free-text search and status filtering over record slices

use crate::core::entity::{Entity, Status};
use serde::Deserialize;

/// Query parameters accepted by list endpoints
///
/// # Example
/// ```text
/// GET /rooms?q=p10
/// GET /invoices?q=nguyễn&status=unpaid
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Free-text query, matched case-insensitively
    pub q: Option<String>,

    /// Status wire name; absent means every status
    pub status: Option<String>,
}

impl SearchParams {
    /// The free-text query, empty when absent
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Whether `record` matches `query` on any of its search fields.
///
/// Matching is a case-insensitive substring test. An empty query matches
/// everything; a field without a value never matches a non-empty query.
pub fn matches<T: Entity>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();

    T::search_fields().iter().any(|field| {
        record
            .field_value(field)
            .and_then(|value| value.search_text().map(|text| text.to_lowercase()))
            .is_some_and(|text| text.contains(&needle))
    })
}

/// Records matching `query`, in their original order
pub fn filter<T: Entity>(records: &[T], query: &str) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches(*record, query))
        .cloned()
        .collect()
}

/// Records matching `query` whose status equals `status` (`None` = any)
pub fn filter_by_status<T: Entity>(records: &[T], query: &str, status: Option<T::Status>) -> Vec<T> {
    records
        .iter()
        .filter(|record| status.is_none_or(|wanted| record.status() == wanted))
        .filter(|record| matches(*record, query))
        .cloned()
        .collect()
}

/// Parse an optional status wire name.
///
/// `None`, empty and `"all"` mean no status filter; an unknown name is
/// returned as the error.
pub fn parse_status_filter<S: Status>(value: Option<&str>) -> Result<Option<S>, String> {
    match value {
        None | Some("") => Ok(None),
        Some(all) if all.eq_ignore_ascii_case("all") => Ok(None),
        Some(name) => S::parse(name).map(Some).ok_or_else(|| name.to_string()),
    }
}

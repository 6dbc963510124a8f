//! Query option-sets passed to the injected fetch function.
//!
//! An option-set is immutable once used to fetch a page: every successful
//! forward fetch records its exact resolved options in the cursor's
//! [`History`](crate::history::History), which is what makes backward
//! replay and [`same_page`](crate::cursor::PageCursor::same_page)
//! reproduce byte-identical queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size used when the caller does not configure one.
pub const DEFAULT_LIMIT: u64 = 20;

/// Resolved options for a single page fetch.
///
/// Only the fields relevant to the issuing cursor kind are set: key-range
/// cursors use `startkey`/`endkey`/`skip`, bookmark cursors use `bookmark`,
/// and `limit` is common to all kinds. Unset fields are skipped during
/// serialization, so an option-set serializes to exactly the query the
/// backend expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Page size. Zero or absent resolves to [`DEFAULT_LIMIT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Inclusive lower key bound for key-range queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startkey: Option<Value>,
    /// Inclusive upper key bound for key-range queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endkey: Option<Value>,
    /// Rows to skip past the `startkey` position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// Opaque continuation token for bookmark queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
}

impl QueryOptions {
    /// Page size with the default applied. A zero limit counts as unset.
    #[must_use]
    pub fn resolved_limit(&self) -> u64 {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_skipped_during_serialization() {
        let opts = QueryOptions {
            limit: Some(20),
            startkey: Some(json!("galaxy")),
            ..QueryOptions::default()
        };

        let value = serde_json::to_value(&opts).unwrap();
        assert_eq!(value, json!({ "limit": 20, "startkey": "galaxy" }));
    }

    #[test]
    fn limit_defaults_when_absent_or_zero() {
        assert_eq!(QueryOptions::default().resolved_limit(), DEFAULT_LIMIT);

        let zero = QueryOptions {
            limit: Some(0),
            ..QueryOptions::default()
        };
        assert_eq!(zero.resolved_limit(), DEFAULT_LIMIT);

        let five = QueryOptions {
            limit: Some(5),
            ..QueryOptions::default()
        };
        assert_eq!(five.resolved_limit(), 5);
    }

    #[test]
    fn deserializes_from_partial_maps() {
        let opts: QueryOptions =
            serde_json::from_value(json!({ "bookmark": "g1AAAA" })).unwrap();
        assert_eq!(opts.bookmark.as_deref(), Some("g1AAAA"));
        assert!(opts.limit.is_none());
    }
}

//! Page result shapes returned by the two query protocols.
//!
//! A fetch function returns a raw [`serde_json::Value`]; each cursor kind
//! interprets it into its typed page shape. A result missing the expected
//! `rows`/`docs` field is a contract violation of the injected function and
//! fails loudly rather than being coerced to an empty page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CursorError;

/// One entry of a row-oriented (key-range) page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Document id the row was emitted from, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Emitted key. Page order follows the backend's collation of this value.
    #[serde(default)]
    pub key: Value,
    /// Emitted value.
    #[serde(default)]
    pub value: Value,
    /// Full document, present when the query ran with `include_docs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
}

/// A page of a key-range query: ordered rows plus backend bookkeeping.
///
/// A page is "full" when `rows.len()` equals the configured limit and
/// "short" or empty otherwise; a short page proves no more data follows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowPage {
    /// Total rows in the unpaginated result set, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    /// Offset of the first row within the unpaginated result set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// The rows of this page, in backend collation order.
    pub rows: Vec<Row>,
}

/// A page of a bookmark query: documents plus an opaque continuation token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocPage {
    /// The matching documents of this page.
    pub docs: Vec<Value>,
    /// Continuation token for the next page. May be absent, empty, or the
    /// literal `"nil"` when the backend has nothing further to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    /// Backend warning (e.g. a query answered without an index).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl RowPage {
    /// Interprets a raw fetch result as a row page.
    ///
    /// # Errors
    ///
    /// [`CursorError::MalformedPage`] when `rows` is missing or the result
    /// does not deserialize as a row page.
    pub fn from_value(value: Value) -> Result<Self, CursorError> {
        if value.get("rows").is_none() {
            return Err(CursorError::MalformedPage {
                reason: "missing `rows` field".to_owned(),
            });
        }
        serde_json::from_value(value).map_err(|err| CursorError::MalformedPage {
            reason: err.to_string(),
        })
    }
}

impl DocPage {
    /// Interprets a raw fetch result as a doc page.
    ///
    /// # Errors
    ///
    /// [`CursorError::MalformedPage`] when `docs` is missing or the result
    /// does not deserialize as a doc page.
    pub fn from_value(value: Value) -> Result<Self, CursorError> {
        if value.get("docs").is_none() {
            return Err(CursorError::MalformedPage {
                reason: "missing `docs` field".to_owned(),
            });
        }
        serde_json::from_value(value).map_err(|err| CursorError::MalformedPage {
            reason: err.to_string(),
        })
    }

    /// Whether the returned bookmark can continue iteration.
    ///
    /// Absent, empty, and `"nil"` bookmarks cannot.
    #[must_use]
    pub fn has_bookmark(&self) -> bool {
        self.bookmark
            .as_deref()
            .is_some_and(|token| !token.is_empty() && token != "nil")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_page_parses_couch_shaped_results() {
        let page = RowPage::from_value(json!({
            "total_rows": 2,
            "offset": 0,
            "rows": [
                { "id": "a", "key": "galaxy", "value": null },
                { "id": "b", "key": ["galaxy", "b"], "value": 1 },
            ],
        }))
        .unwrap();

        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].id.as_deref(), Some("a"));
        assert_eq!(page.rows[1].key, json!(["galaxy", "b"]));
    }

    #[test]
    fn row_page_rejects_results_without_rows() {
        let err = RowPage::from_value(json!({ "ok": true })).unwrap_err();
        assert!(matches!(err, CursorError::MalformedPage { .. }));
    }

    #[test]
    fn doc_page_rejects_results_without_docs() {
        let err = DocPage::from_value(json!({ "rows": [] })).unwrap_err();
        assert!(matches!(err, CursorError::MalformedPage { .. }));
    }

    #[test]
    fn empty_and_nil_bookmarks_are_not_continuations() {
        let exhausted = DocPage {
            docs: vec![json!({ "_id": "a" })],
            bookmark: Some(String::new()),
            warning: None,
        };
        assert!(!exhausted.has_bookmark());

        let nil = DocPage {
            bookmark: Some("nil".to_owned()),
            ..DocPage::default()
        };
        assert!(!nil.has_bookmark());

        let live = DocPage {
            bookmark: Some("g1AAAA".to_owned()),
            ..DocPage::default()
        };
        assert!(live.has_bookmark());
    }
}

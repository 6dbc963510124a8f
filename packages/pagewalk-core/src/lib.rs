//! Pagewalk core — bidirectional page cursors over one-shot query functions.
//!
//! Converts an injected async "fetch a page of results" function into a
//! stateful cursor that walks forward through a result set page by page,
//! walks backward through previously seen pages by replaying their exact
//! queries, and re-fetches the current page idempotently. Two underlying
//! query protocols are reconciled behind one contract:
//!
//! - [`KeyRangeCursor`]: ordered key-based queries (`startkey`/`endkey`/
//!   `skip`), including skip correction for pages whose boundary falls
//!   inside a run of duplicate keys.
//! - [`BookmarkCursor`]: opaque continuation-token queries, with a
//!   configurable [`ExhaustionPolicy`] for backends that signal the end of
//!   the result set through the token rather than an empty page.
//!
//! Across a complete forward sweep the yielded pages partition the full
//! result set: no row skipped, none duplicated, ordering preserved.
//!
//! ```
//! use futures_util::StreamExt;
//! use pagewalk_core::{pages, FetcherFn, KeyRangeCursor, QueryOptions};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // The injected fetch function: here a fixed single page.
//! let fetcher = FetcherFn::new(|opts: QueryOptions| async move {
//!     assert_eq!(opts.limit, Some(20));
//!     Ok(json!({ "rows": [{ "id": "a", "key": "k", "value": null }] }))
//! });
//!
//! let mut cursor = KeyRangeCursor::new(fetcher, QueryOptions::default());
//! let mut stream = std::pin::pin!(pages(&mut cursor));
//! let mut total = 0;
//! while let Some(page) = stream.next().await {
//!     total += page.unwrap().rows.len();
//! }
//! assert_eq!(total, 1);
//! # }
//! ```

pub mod bookmark;
pub mod cursor;
pub mod error;
pub mod fetch;
pub mod history;
pub mod key_range;
pub mod options;
pub mod page;
pub mod paginate;
pub mod stream;

pub use bookmark::{BookmarkCursor, ExhaustionPolicy};
pub use cursor::PageCursor;
pub use error::CursorError;
pub use fetch::{FetcherFn, PageFetcher};
pub use history::History;
pub use key_range::KeyRangeCursor;
pub use options::{QueryOptions, DEFAULT_LIMIT};
pub use page::{DocPage, Row, RowPage};
pub use paginate::{find_query, find_query_with_policy, view_query, FindQuery, ViewQuery};
pub use stream::{pages, reverse};

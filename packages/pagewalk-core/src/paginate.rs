//! Decoration factories: wrap a query function into a cursor at the call
//! site.
//!
//! The host client's query methods are never patched or replaced; the
//! caller hands an explicit fetch function to a factory and receives either
//! a cursor or, when pagination is disabled, the raw query result exactly
//! as the backend returned it. Because nothing global is mutated, there is
//! no "unwrap the patch" counterpart to keep in sync.

use serde_json::Value;

use crate::bookmark::{BookmarkCursor, ExhaustionPolicy};
use crate::error::CursorError;
use crate::fetch::PageFetcher;
use crate::key_range::KeyRangeCursor;
use crate::options::QueryOptions;

/// Outcome of a view-style (key-range) query request.
pub enum ViewQuery<F> {
    /// Pagination was disabled: the raw fetch result, untouched.
    Raw(Value),
    /// A cursor positioned before the first page.
    Paginated(KeyRangeCursor<F>),
}

/// Outcome of a find-style (bookmark) query request.
pub enum FindQuery<F> {
    /// Pagination was disabled: the raw fetch result, untouched.
    Raw(Value),
    /// A cursor positioned before the first page.
    Paginated(BookmarkCursor<F>),
}

/// Wraps a key-range query function in a [`KeyRangeCursor`], or, when
/// `paginate` is false, runs the query once and returns its raw result
/// unchanged.
///
/// When paginating, no fetch happens here: the cursor issues its first
/// query on the first navigation call.
///
/// # Errors
///
/// Only the non-paginated path can fail, with the fetch function's own
/// error propagated unchanged.
pub async fn view_query<F: PageFetcher>(
    fetcher: F,
    opts: QueryOptions,
    paginate: bool,
) -> Result<ViewQuery<F>, CursorError> {
    if paginate {
        Ok(ViewQuery::Paginated(KeyRangeCursor::new(fetcher, opts)))
    } else {
        let raw = fetcher.fetch(&opts).await.map_err(CursorError::Fetch)?;
        Ok(ViewQuery::Raw(raw))
    }
}

/// Wraps a find-style query function in a [`BookmarkCursor`] with the
/// default [`ExhaustionPolicy`], or, when `paginate` is false, runs the
/// query once and returns its raw result unchanged.
///
/// # Errors
///
/// Only the non-paginated path can fail, with the fetch function's own
/// error propagated unchanged.
pub async fn find_query<F: PageFetcher>(
    fetcher: F,
    opts: QueryOptions,
    paginate: bool,
) -> Result<FindQuery<F>, CursorError> {
    find_query_with_policy(fetcher, opts, paginate, ExhaustionPolicy::default()).await
}

/// [`find_query`] with an explicit exhaustion policy for the cursor.
///
/// # Errors
///
/// Only the non-paginated path can fail, with the fetch function's own
/// error propagated unchanged.
pub async fn find_query_with_policy<F: PageFetcher>(
    fetcher: F,
    opts: QueryOptions,
    paginate: bool,
    policy: ExhaustionPolicy,
) -> Result<FindQuery<F>, CursorError> {
    if paginate {
        Ok(FindQuery::Paginated(BookmarkCursor::with_policy(
            fetcher, opts, policy,
        )))
    } else {
        let raw = fetcher.fetch(&opts).await.map_err(CursorError::Fetch)?;
        Ok(FindQuery::Raw(raw))
    }
}

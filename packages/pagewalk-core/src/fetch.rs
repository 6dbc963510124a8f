//! The injected fetch function seam.
//!
//! A cursor never talks to a database directly: it is constructed around a
//! [`PageFetcher`], an opaque one-shot "run this query once" function
//! supplied by the caller. Timeouts, retries, and cancellation are the
//! caller's concern and are applied by wrapping the fetcher, not inside the
//! cursor.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::options::QueryOptions;

/// A one-shot page fetch function.
///
/// Implementations execute one query with the given resolved options and
/// return the backend's raw result. Failures are surfaced unchanged; the
/// cursor neither classifies nor retries them.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Executes one query.
    async fn fetch(&self, opts: &QueryOptions) -> anyhow::Result<Value>;
}

/// Adapter turning an async closure into a [`PageFetcher`].
///
/// ```
/// use pagewalk_core::{FetcherFn, QueryOptions};
/// use serde_json::json;
///
/// let fetcher = FetcherFn::new(|_opts: QueryOptions| async move {
///     Ok::<_, anyhow::Error>(json!({ "rows": [] }))
/// });
/// # let _ = fetcher;
/// ```
pub struct FetcherFn<F>(F);

impl<F> FetcherFn<F> {
    /// Wraps an async closure.
    pub fn new(fetch: F) -> Self {
        Self(fetch)
    }
}

#[async_trait]
impl<F, Fut> PageFetcher for FetcherFn<F>
where
    F: Fn(QueryOptions) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    async fn fetch(&self, opts: &QueryOptions) -> anyhow::Result<Value> {
        (self.0)(opts.clone()).await
    }
}

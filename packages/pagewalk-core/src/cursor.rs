//! The bidirectional cursor contract and shared navigation bookkeeping.
//!
//! [`PageCursor`] is the capability set both concrete cursor kinds
//! implement. The history bookkeeping that must be bit-exact for backward
//! replay lives once in the private [`CursorCore`]; exhaustion detection is
//! deferred to the concrete cursors because the two query protocols signal
//! "no more data" differently.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CursorError;
use crate::fetch::PageFetcher;
use crate::history::History;
use crate::options::QueryOptions;

/// A stateful bidirectional cursor over an injected fetch function.
///
/// A cursor is created bound to one fetch function and one initial
/// option-set, is mutated in place by every navigation call, and is simply
/// dropped once iteration ends.
///
/// # Usage contract
///
/// Navigation methods take `&mut self` and must not be invoked again before
/// the previous call resolves; the borrow checker enforces this for a single
/// cursor instance. The cursor holds no internal lock and defines no
/// timeout or cancellation semantics: callers wanting either wrap the
/// injected fetch function. Concurrent mutation of the underlying
/// collection during a sweep is not corrected for; pages reflect whatever
/// the backend returned at fetch time.
#[async_trait]
pub trait PageCursor: Send {
    /// Page shape this cursor produces.
    type Page: Send;

    /// Whether an unexplored page may still follow the current one.
    ///
    /// Optimistically true before the first fetch: unexplored data is
    /// assumed to exist until a fetch proves otherwise.
    fn has_next_page(&self) -> bool;

    /// Whether a page earlier than the current one is recorded.
    fn has_prev_page(&self) -> bool;

    /// The options the next forward fetch would use.
    ///
    /// Merges the page limit with cursor-kind-specific fields. Does not
    /// consult history.
    fn next_opts(&self) -> QueryOptions;

    /// Fetches the next page and advances the cursor onto it.
    ///
    /// The resolved options are recorded for later replay only after the
    /// fetch succeeds and the result parses as a page; a failed fetch
    /// leaves the cursor untouched.
    ///
    /// # Errors
    ///
    /// [`CursorError::Fetch`] when the injected function fails,
    /// [`CursorError::MalformedPage`] when its result is not page-shaped.
    async fn next_page(&mut self) -> Result<Self::Page, CursorError>;

    /// Replays the page before the current one and steps the cursor back
    /// onto it, using the exact options recorded for it.
    ///
    /// After a successful call the next forward fetch reproduces the
    /// replayed page.
    ///
    /// # Errors
    ///
    /// [`CursorError::EmptyHistory`] when [`has_prev_page`] is false:
    /// navigating backward with nothing to go back to is a programming
    /// error, not a recoverable condition. Fetch and shape errors as for
    /// [`next_page`].
    ///
    /// [`has_prev_page`]: PageCursor::has_prev_page
    /// [`next_page`]: PageCursor::next_page
    async fn prev_page(&mut self) -> Result<Self::Page, CursorError>;

    /// Re-fetches the current page without moving the cursor.
    ///
    /// Uses the most recent recorded option-set, or the would-be first
    /// page's options on a cursor that has never navigated (recording them
    /// on success).
    ///
    /// # Errors
    ///
    /// Fetch and shape errors as for [`next_page`](PageCursor::next_page).
    async fn same_page(&mut self) -> Result<Self::Page, CursorError>;
}

/// Shared cursor state: the fetch function, page limit, option history, and
/// the optimistic exhaustion flag.
pub(crate) struct CursorCore<F> {
    fetcher: F,
    pub(crate) limit: u64,
    pub(crate) history: History,
    pub(crate) has_next: bool,
}

impl<F: PageFetcher> CursorCore<F> {
    /// `limit` must already be resolved via
    /// [`QueryOptions::resolved_limit`]; zero is not a valid page size here.
    pub(crate) fn new(fetcher: F, limit: u64) -> Self {
        Self {
            fetcher,
            limit,
            history: History::new(),
            has_next: true,
        }
    }

    pub(crate) fn has_prev(&self) -> bool {
        self.history.depth() > 1
    }

    /// Runs one fetch without touching any cursor state.
    pub(crate) async fn fetch(&self, opts: &QueryOptions) -> Result<Value, CursorError> {
        self.fetcher.fetch(opts).await.map_err(CursorError::Fetch)
    }

    /// The option-set backward navigation replays: the entry below the top.
    pub(crate) fn replay_target(&self) -> Result<QueryOptions, CursorError> {
        self.history
            .parent()
            .cloned()
            .ok_or(CursorError::EmptyHistory)
    }

    /// Commits a backward step by dropping the current page's entry, making
    /// the replayed entry the new top. Called only after the replay fetch
    /// succeeded.
    pub(crate) fn commit_backward_step(&mut self) {
        self.history.pop();
    }

    /// Options for an idempotent re-fetch of the current page, plus whether
    /// they still need recording (true only before the first navigation).
    pub(crate) fn same_page_opts(
        &self,
        first: impl FnOnce() -> QueryOptions,
    ) -> (QueryOptions, bool) {
        match self.history.last() {
            Some(opts) => (opts.clone(), false),
            None => (first(), true),
        }
    }
}

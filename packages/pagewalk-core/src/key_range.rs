//! Key-range cursor: ordered `startkey`/`endkey`/`skip` pagination.
//!
//! Covers view- and `allDocs`-style queries whose results are ordered by a
//! sortable key. The hard part is the page boundary: the backend's
//! `startkey` is inclusive and keys are not unique, so a naive re-query
//! from the last seen key would re-return rows sharing that key. The
//! cursor therefore carries a `skip` correction recomputed after every
//! forward fetch (see [`KeyRangeCursor::absorb`]).

use async_trait::async_trait;
use serde_json::Value;

use crate::cursor::{CursorCore, PageCursor};
use crate::error::CursorError;
use crate::fetch::PageFetcher;
use crate::options::QueryOptions;
use crate::page::RowPage;

/// Bidirectional cursor over a key-range query.
///
/// Recognized construction options: `limit` (default 20), `startkey` (a
/// caller-forced starting position), `endkey` (fixed upper bound for the
/// cursor's lifetime), and `skip`.
pub struct KeyRangeCursor<F> {
    core: CursorCore<F>,
    /// Lower bound of the next forward fetch: the last key seen so far.
    startkey: Option<Value>,
    /// Upper bound, never mutated after construction.
    endkey: Option<Value>,
    /// Rows to skip past the `startkey` position on the next fetch.
    skip: u64,
}

impl<F: PageFetcher> KeyRangeCursor<F> {
    /// Creates a cursor bound to one fetch function and one initial
    /// option-set.
    #[must_use]
    pub fn new(fetcher: F, opts: QueryOptions) -> Self {
        Self {
            core: CursorCore::new(fetcher, opts.resolved_limit()),
            startkey: opts.startkey,
            endkey: opts.endkey,
            skip: opts.skip.unwrap_or(0),
        }
    }

    /// Updates cursor position and the exhaustion flag from a freshly
    /// fetched page.
    ///
    /// An empty page is terminal and is popped back off the history: it is
    /// not a valid current page to replay later. Otherwise the next lower
    /// bound is the last row's key, a short page proves exhaustion, and
    /// `skip` is recomputed to bypass the rows sharing the boundary key
    /// that this page already returned. When the entire window collapsed to
    /// a single key, keys cannot express a position at all, so `skip`
    /// degenerates to an offset within the run: it keeps growing while the
    /// fetch was already seeked to that key, and restarts from this page's
    /// row count when the run is first met at a page boundary.
    fn absorb(&mut self, page: &RowPage) {
        if page.rows.is_empty() {
            self.core.history.pop();
            self.core.has_next = false;
            return;
        }

        let last_key = page.rows[page.rows.len() - 1].key.clone();
        let uniform = last_key == page.rows[0].key;
        self.core.has_next = page.rows.len() as u64 == self.core.limit;

        if uniform {
            // The carried offset is relative to the key the fetch seeked
            // to; re-based onto a new key it would overshoot and drop rows.
            let continuing = self.startkey.as_ref() == Some(&last_key);
            let seen = page.rows.len() as u64;
            self.skip = if continuing { self.skip + seen } else { seen };
        } else {
            // Counts the boundary row itself too: an inclusive startkey
            // re-query would otherwise return it again.
            self.skip = page
                .rows
                .iter()
                .filter(|row| row.key == last_key)
                .count() as u64;
        }
        self.startkey = Some(last_key);
    }
}

#[async_trait]
impl<F: PageFetcher> PageCursor for KeyRangeCursor<F> {
    type Page = RowPage;

    fn has_next_page(&self) -> bool {
        self.core.has_next
    }

    fn has_prev_page(&self) -> bool {
        self.core.has_prev()
    }

    fn next_opts(&self) -> QueryOptions {
        QueryOptions {
            limit: Some(self.core.limit),
            startkey: self.startkey.clone(),
            endkey: self.endkey.clone(),
            skip: (self.skip > 0).then_some(self.skip),
            bookmark: None,
        }
    }

    async fn next_page(&mut self) -> Result<RowPage, CursorError> {
        let opts = self.next_opts();
        let raw = self.core.fetch(&opts).await?;
        let page = RowPage::from_value(raw)?;

        self.core.history.push(opts);
        self.absorb(&page);
        tracing::debug!(
            rows = page.rows.len(),
            depth = self.core.history.depth(),
            has_next = self.core.has_next,
            "fetched next key-range page"
        );
        Ok(page)
    }

    async fn prev_page(&mut self) -> Result<RowPage, CursorError> {
        let replay = self.core.replay_target()?;
        let raw = self.core.fetch(&replay).await?;
        let page = RowPage::from_value(raw)?;

        self.core.commit_backward_step();
        self.startkey = replay.startkey;
        self.skip = replay.skip.unwrap_or(0);
        // The page just stepped back from is known to exist.
        self.core.has_next = true;
        tracing::debug!(
            rows = page.rows.len(),
            depth = self.core.history.depth(),
            "replayed previous key-range page"
        );
        Ok(page)
    }

    async fn same_page(&mut self) -> Result<RowPage, CursorError> {
        let (opts, record) = self.core.same_page_opts(|| self.next_opts());
        let raw = self.core.fetch(&opts).await?;
        let page = RowPage::from_value(raw)?;
        if record {
            self.core.history.push(opts);
        }
        Ok(page)
    }
}

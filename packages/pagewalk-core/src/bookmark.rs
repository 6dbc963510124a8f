//! Bookmark cursor: opaque continuation-token pagination.
//!
//! Covers Mango/`find`-style queries where the backend returns an opaque
//! bookmark with every page and expects it back on the next request. The
//! token carries no position the cursor could reason about, so forward
//! progress is simply "adopt the token the last page returned".

use async_trait::async_trait;

use crate::cursor::{CursorCore, PageCursor};
use crate::error::CursorError;
use crate::fetch::PageFetcher;
use crate::options::QueryOptions;
use crate::page::DocPage;

/// When a bookmark cursor considers the result set exhausted.
///
/// Backends differ on their authoritative empty signal: some guarantee a
/// live bookmark on every non-final page, others return a bookmark even on
/// the final one and only an empty doc list is conclusive. The two rules
/// are observably different when a backend returns a final non-empty page
/// with an empty bookmark, so the choice is configuration, not guesswork.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Only an empty doc list ends iteration. Use when the backend always
    /// returns a usable bookmark, even on the final page.
    EmptyDocs,
    /// An empty doc list or a dead bookmark (absent, empty, or `"nil"`)
    /// ends iteration. The safer default: it avoids one trailing empty
    /// fetch against backends that signal exhaustion through the token.
    #[default]
    EmptyDocsOrBookmark,
}

/// Bidirectional cursor over a bookmark query.
///
/// Recognized construction options: `limit` (default 20) and `bookmark`
/// (a caller-provided continuation to resume from).
pub struct BookmarkCursor<F> {
    core: CursorCore<F>,
    /// Continuation token for the next forward fetch.
    bookmark: Option<String>,
    policy: ExhaustionPolicy,
}

impl<F: PageFetcher> BookmarkCursor<F> {
    /// Creates a cursor with the default [`ExhaustionPolicy`].
    #[must_use]
    pub fn new(fetcher: F, opts: QueryOptions) -> Self {
        Self::with_policy(fetcher, opts, ExhaustionPolicy::default())
    }

    /// Creates a cursor with an explicit exhaustion policy.
    #[must_use]
    pub fn with_policy(fetcher: F, opts: QueryOptions, policy: ExhaustionPolicy) -> Self {
        Self {
            core: CursorCore::new(fetcher, opts.resolved_limit()),
            bookmark: opts.bookmark,
            policy,
        }
    }

    /// Adopts the page's continuation token and updates the exhaustion
    /// flag per the configured policy.
    ///
    /// An empty page is terminal and popped back off the history, exactly
    /// as for key-range cursors. A dead returned bookmark is never
    /// adopted: overwriting a live token with it would silently restart
    /// iteration from the beginning.
    fn absorb(&mut self, page: &DocPage) {
        if page.docs.is_empty() {
            self.core.history.pop();
            self.core.has_next = false;
            return;
        }
        if page.has_bookmark() {
            self.bookmark.clone_from(&page.bookmark);
        } else if self.policy == ExhaustionPolicy::EmptyDocsOrBookmark {
            self.core.has_next = false;
        }
    }
}

#[async_trait]
impl<F: PageFetcher> PageCursor for BookmarkCursor<F> {
    type Page = DocPage;

    fn has_next_page(&self) -> bool {
        self.core.has_next
    }

    fn has_prev_page(&self) -> bool {
        self.core.has_prev()
    }

    fn next_opts(&self) -> QueryOptions {
        QueryOptions {
            limit: Some(self.core.limit),
            bookmark: self.bookmark.clone(),
            ..QueryOptions::default()
        }
    }

    async fn next_page(&mut self) -> Result<DocPage, CursorError> {
        let opts = self.next_opts();
        let raw = self.core.fetch(&opts).await?;
        let page = DocPage::from_value(raw)?;

        self.core.history.push(opts);
        self.absorb(&page);
        tracing::debug!(
            docs = page.docs.len(),
            depth = self.core.history.depth(),
            has_next = self.core.has_next,
            "fetched next bookmark page"
        );
        Ok(page)
    }

    async fn prev_page(&mut self) -> Result<DocPage, CursorError> {
        let replay = self.core.replay_target()?;
        let raw = self.core.fetch(&replay).await?;
        let page = DocPage::from_value(raw)?;

        self.core.commit_backward_step();
        // Restore the token that addressed the replayed page; the refetch's
        // own returned bookmark would point forward again.
        self.bookmark = replay.bookmark;
        self.core.has_next = true;
        tracing::debug!(
            docs = page.docs.len(),
            depth = self.core.history.depth(),
            "replayed previous bookmark page"
        );
        Ok(page)
    }

    async fn same_page(&mut self) -> Result<DocPage, CursorError> {
        let (opts, record) = self.core.same_page_opts(|| self.next_opts());
        let raw = self.core.fetch(&opts).await?;
        let page = DocPage::from_value(raw)?;
        if record {
            self.core.history.push(opts);
        }
        Ok(page)
    }
}

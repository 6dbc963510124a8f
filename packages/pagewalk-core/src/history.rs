//! Option-set history powering backward replay.

use crate::options::QueryOptions;

/// Ordered stack of the exact option-sets used for each forward fetch.
///
/// One entry per page successfully advanced into; the top entry always
/// belongs to the page the cursor currently sits on. Recording the resolved
/// options verbatim is what guarantees that backward navigation and
/// same-page re-fetches reproduce the original queries exactly, with no
/// separate undo arithmetic.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<QueryOptions>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages recorded so far.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Records the options used for a page successfully advanced into.
    pub fn push(&mut self, opts: QueryOptions) {
        self.entries.push(opts);
    }

    /// Drops the most recent entry, returning it.
    pub fn pop(&mut self) -> Option<QueryOptions> {
        self.entries.pop()
    }

    /// The current page's options, if any page has been fetched.
    #[must_use]
    pub fn last(&self) -> Option<&QueryOptions> {
        self.entries.last()
    }

    /// The entry immediately below the top: the page before the current one.
    #[must_use]
    pub fn parent(&self) -> Option<&QueryOptions> {
        self.entries
            .len()
            .checked_sub(2)
            .and_then(|index| self.entries.get(index))
    }
}

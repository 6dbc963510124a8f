//! Cursor error taxonomy.
//!
//! Three distinct failure classes, kept separate so callers can tell a
//! programming error apart from a backend failure:
//!
//! - usage errors ([`CursorError::EmptyHistory`]): a precondition the caller
//!   could have checked; never retried, never recoverable in place.
//! - contract violations ([`CursorError::MalformedPage`]): the injected fetch
//!   function returned something that is not shaped like a page.
//! - upstream failures ([`CursorError::Fetch`]): whatever the underlying
//!   store surfaced, propagated unchanged. Retry semantics belong to the
//!   caller, who knows the backend's idempotency guarantees.

use thiserror::Error;

/// Errors produced by cursor navigation.
#[derive(Debug, Error)]
pub enum CursorError {
    /// Backward navigation was requested with no earlier page recorded.
    ///
    /// Callers must check
    /// [`has_prev_page`](crate::cursor::PageCursor::has_prev_page) first.
    #[error("no previous page recorded; check `has_prev_page` before navigating backward")]
    EmptyHistory,

    /// The fetch function returned a result missing the expected page fields.
    #[error("malformed page result: {reason}")]
    MalformedPage {
        /// What was wrong with the result.
        reason: String,
    },

    /// The injected fetch function failed. Propagated unchanged, no retries.
    #[error(transparent)]
    Fetch(#[from] anyhow::Error),
}

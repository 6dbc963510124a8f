//! Lazy page sequences over a cursor.
//!
//! Both sequences borrow the cursor mutably for their whole lifetime, so
//! the no-concurrent-navigation contract is enforced by the borrow checker.
//! They are finite and not restartable: consuming them advances the
//! underlying cursor, and a fresh call picks up wherever the cursor now
//! sits.

use futures_util::stream::{self, Stream};

use crate::cursor::PageCursor;
use crate::error::CursorError;

/// Forward sweep: yields pages until the cursor reports exhaustion.
///
/// The terminal short or empty page is itself yielded before the sequence
/// ends, so consumers see every real page exactly once, including the
/// boundary page that proved exhaustion. A fetch error ends the sequence
/// after yielding it. On a cursor that already reports exhaustion the
/// sequence is empty and no fetch is issued.
pub fn pages<C>(cursor: &mut C) -> impl Stream<Item = Result<C::Page, CursorError>> + '_
where
    C: PageCursor,
{
    let done = !cursor.has_next_page();
    stream::try_unfold((cursor, done), |(cursor, done)| async move {
        if done {
            return Ok(None);
        }
        let page = cursor.next_page().await?;
        let done = !cursor.has_next_page();
        Ok(Some((page, (cursor, done))))
    })
}

/// Backward sweep: replays earlier pages until none remain.
///
/// Consuming the sequence fully returns the cursor to the very first
/// page's state. On a cursor that has not navigated forward there is
/// nothing to reverse from and the sequence is empty.
pub fn reverse<C>(cursor: &mut C) -> impl Stream<Item = Result<C::Page, CursorError>> + '_
where
    C: PageCursor,
{
    stream::try_unfold(cursor, |cursor| async move {
        if !cursor.has_prev_page() {
            return Ok(None);
        }
        let page = cursor.prev_page().await?;
        Ok(Some((page, cursor)))
    })
}

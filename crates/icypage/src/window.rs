//! Module: window
//! Responsibility: canonical page window arithmetic over absolute positions.
//! Does not own: item access, push-down dispatch, or connection assembly.

use crate::arguments::PagingArguments;

///
/// PageWindow
///
/// Resolved half-open window `[start, end)` over absolute positions plus
/// the boundary flags derived from the full sequence length.
///
/// Every source strategy (slice, lazy iterator, push-down) resolves its page
/// through this type so all of them agree on edges and flags.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageWindow {
    /// Resolve the window for `args` over a sequence of `len` items.
    ///
    /// Cursor bounds clip first (`after` exclusive, `before` exclusive), then
    /// `first` trims from the front and `last` narrows what remains from the
    /// back. Bounds never widen.
    #[must_use]
    pub fn resolve(args: &PagingArguments, len: usize) -> Self {
        let mut start = args
            .after()
            .map_or(0, |after| after.saturating_add(1))
            .min(len);
        let mut end = args.before().map_or(len, |before| before.min(len)).max(start);

        if let Some(first) = args.first() {
            end = end.min(start.saturating_add(count(first)));
        }
        if let Some(last) = args.last() {
            start = start.max(end.saturating_sub(count(last)));
        }

        Self {
            start,
            end,
            has_previous_page: start > 0,
            has_next_page: end < len,
        }
    }

    /// Number of leading items a source must produce to resolve the window
    /// exactly, or `None` when the whole sequence is needed.
    ///
    /// Resolving against `min(len, fetch_limit)` items yields the same window
    /// as resolving against the full length: the extra item past the highest
    /// bound the window can reach decides `has_next_page`.
    #[must_use]
    pub fn fetch_limit(args: &PagingArguments) -> Option<usize> {
        let lower = args.after().map_or(0, |after| after.saturating_add(1));
        let from_first = args
            .first()
            .map(|first| lower.saturating_add(count(first)));

        let upper = match (args.before(), from_first) {
            (Some(before), Some(bound)) => before.min(bound),
            (Some(before), None) => before,
            (None, Some(bound)) => bound,
            (None, None) => return None,
        };

        Some(upper.max(lower).saturating_add(1))
    }

    /// Number of positions inside the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn count(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

///
/// TESTS
///

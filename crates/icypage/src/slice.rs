//! Module: slice
//! Responsibility: select one page from a source, preferring push-down.
//! Does not own: argument validation or connection assembly.

use crate::{
    arguments::PagingArguments,
    obs::{CountStrategy, SliceStrategy},
    source::{ExecutableSource, PagingSource, PushDown, SliceResult, SourceError},
    window::PageWindow,
};
use tracing::{debug, trace, warn};

///
/// SlicedPage
///
/// Selected items plus the total count (when requested) and the strategies
/// that produced them.
///

#[derive(Debug)]
pub(crate) struct SlicedPage<T> {
    pub(crate) slice: SliceResult<T>,
    pub(crate) total_count: Option<usize>,
    pub(crate) strategy: SliceStrategy,
    pub(crate) count_strategy: Option<CountStrategy>,
}

impl<T> SlicedPage<T> {
    fn materialized(items: Vec<T>, args: &PagingArguments, include_total_count: bool) -> Self {
        let len = items.len();

        Self {
            slice: SliceResult::from_vec(items, args),
            total_count: include_total_count.then_some(len),
            strategy: SliceStrategy::Materialized,
            count_strategy: include_total_count.then_some(CountStrategy::Enumerated),
        }
    }
}

/// Slice any source. Only executable sources suspend.
pub(crate) async fn slice_source<T: Clone>(
    source: PagingSource<'_, T>,
    args: &PagingArguments,
    include_total_count: bool,
) -> Result<SlicedPage<T>, SourceError> {
    match source {
        PagingSource::Slice(items) => Ok(slice_items(items, args, include_total_count)),
        PagingSource::Iter(iter) => Ok(slice_iter(iter, args, include_total_count)),
        PagingSource::Executable(source) => {
            slice_executable(source, args, include_total_count).await
        }
    }
}

/// Slice a borrowed, fully materialized sequence.
pub(crate) fn slice_items<T: Clone>(
    items: &[T],
    args: &PagingArguments,
    include_total_count: bool,
) -> SlicedPage<T> {
    let slice = SliceResult::from_slice(items, args);
    debug!(
        len = items.len(),
        start = slice.start,
        rows = slice.items.len(),
        "sliced in-memory sequence"
    );

    SlicedPage {
        slice,
        total_count: include_total_count.then_some(items.len()),
        strategy: SliceStrategy::InMemory,
        count_strategy: include_total_count.then_some(CountStrategy::Enumerated),
    }
}

/// Slice a lazily produced sequence, enumerating it at most once.
///
/// Without a total count and with a window that does not depend on the
/// sequence end, only the first [`PageWindow::fetch_limit`] items are pulled.
pub(crate) fn slice_iter<T>(
    iter: impl Iterator<Item = T>,
    args: &PagingArguments,
    include_total_count: bool,
) -> SlicedPage<T> {
    let fetch_limit = if include_total_count {
        None
    } else {
        PageWindow::fetch_limit(args)
    };

    let Some(limit) = fetch_limit else {
        let items: Vec<T> = iter.collect();
        debug!(len = items.len(), "materialized lazy sequence");

        return SlicedPage::materialized(items, args, include_total_count);
    };

    let probed: Vec<T> = iter.take(limit).collect();
    trace!(limit, probed = probed.len(), "probed lazy sequence");

    SlicedPage {
        slice: SliceResult::from_vec(probed, args),
        total_count: None,
        strategy: SliceStrategy::LazyProbe,
        count_strategy: None,
    }
}

/// Slice an executable source, offering push-down before materializing.
///
/// Slice and count push-downs run concurrently. The source executes at most
/// once, and only when one of them was declined. A failed count is never
/// fatal: it falls back to enumeration like a declined one.
pub(crate) async fn slice_executable<T>(
    source: &dyn ExecutableSource<T>,
    args: &PagingArguments,
    include_total_count: bool,
) -> Result<SlicedPage<T>, SourceError> {
    let (pushed_slice, pushed_count) = if include_total_count {
        let (slice, count) = tokio::join!(source.try_slice(args), source.try_count());
        let count = count.unwrap_or_else(|err| {
            warn!(error = %err, "push-down count failed; enumerating source");
            None
        });

        (slice?, count)
    } else {
        (source.try_slice(args).await?, None)
    };

    let PushDown::Handled(slice) = pushed_slice else {
        debug!("push-down slice declined; executing source");
        let items = source.execute().await?;

        // prefer the source's own count when it supplied one
        let mut page = SlicedPage::materialized(items, args, include_total_count);
        if let Some(count) = pushed_count {
            page.total_count = Some(count);
            page.count_strategy = Some(CountStrategy::PushDown);
        }

        return Ok(page);
    };

    debug!(
        start = slice.start,
        rows = slice.items.len(),
        "push-down slice handled"
    );

    let (total_count, count_strategy) = match (include_total_count, pushed_count) {
        (false, _) => (None, None),
        (true, Some(count)) => (Some(count), Some(CountStrategy::PushDown)),
        (true, None) => {
            debug!("push-down count declined; enumerating source");
            let len = source.execute().await?.len();
            (Some(len), Some(CountStrategy::Enumerated))
        }
    };

    Ok(SlicedPage {
        slice,
        total_count,
        strategy: SliceStrategy::PushDown,
        count_strategy,
    })
}

///
/// TESTS
///

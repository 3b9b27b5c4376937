//! Module: source
//! Responsibility: data-source capability surface and the push-down contract.
//! Does not own: window arithmetic or connection assembly.

use crate::{arguments::PagingArguments, window::PageWindow};
use async_trait::async_trait;
use std::fmt;

///
/// SourceError
///
/// Opaque failure raised by a backing source while executing its query.
/// Never retried by the pagination core.
///

pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

///
/// PushDown
///
/// Outcome of a push-down attempt: the source either handled the request
/// natively or declined and lets the core fall back to materialization.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PushDown<T> {
    Handled(T),
    NotHandled,
}

impl<T> PushDown<T> {
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Handled(value) => Some(value),
            Self::NotHandled => None,
        }
    }

    #[must_use]
    pub const fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

impl<T> From<Option<T>> for PushDown<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotHandled, Self::Handled)
    }
}

///
/// SliceResult
///
/// Items selected for one page plus their absolute starting position and
/// the boundary flags. `items[i]` sits at absolute position `start + i`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SliceResult<T> {
    pub items: Vec<T>,
    pub start: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> SliceResult<T> {
    /// Pair a resolved window with the items it selects.
    #[must_use]
    pub const fn from_window(window: PageWindow, items: Vec<T>) -> Self {
        Self {
            items,
            start: window.start,
            has_previous_page: window.has_previous_page,
            has_next_page: window.has_next_page,
        }
    }

    /// Slice an already materialized sequence.
    #[must_use]
    pub fn from_slice(items: &[T], args: &PagingArguments) -> Self
    where
        T: Clone,
    {
        let window = PageWindow::resolve(args, items.len());

        Self::from_window(window, items[window.start..window.end].to_vec())
    }

    /// Slice an owned sequence without cloning its items.
    #[must_use]
    pub fn from_vec(mut items: Vec<T>, args: &PagingArguments) -> Self {
        let window = PageWindow::resolve(args, items.len());
        items.truncate(window.end);
        items.drain(..window.start);

        Self::from_window(window, items)
    }
}

///
/// ExecutableSource
///
/// Deferred query object. `execute` materializes the full ordered sequence;
/// `try_slice` and `try_count` let a source push the window and the count
/// down into its native query mechanism instead.
///
/// Push-down results must match what the in-memory path computes over the
/// sequence `execute` would return. [`PageWindow::fetch_limit`] and
/// [`SliceResult::from_window`] give implementers the same arithmetic.
///
/// All methods are cancellation-safe by contract: dropping the returned
/// future aborts the underlying call and nothing partial is observed.
///

#[async_trait]
pub trait ExecutableSource<T>: Send + Sync {
    /// Materialize the full ordered sequence.
    async fn execute(&self) -> Result<Vec<T>, SourceError>;

    /// Slice natively, or decline with [`PushDown::NotHandled`].
    async fn try_slice(
        &self,
        _args: &PagingArguments,
    ) -> Result<PushDown<SliceResult<T>>, SourceError> {
        Ok(PushDown::NotHandled)
    }

    /// Count natively, or `None` to fall back to enumeration.
    async fn try_count(&self) -> Result<Option<usize>, SourceError> {
        Ok(None)
    }
}

///
/// PagingSource
///
/// The capability a caller hands to the paginator. Plain sequences are
/// sliced in memory; executable sources are offered push-down first.
///

pub enum PagingSource<'a, T> {
    /// Materialized ordered sequence.
    Slice(&'a [T]),

    /// Lazily produced ordered sequence, enumerated at most once.
    Iter(Box<dyn Iterator<Item = T> + Send + 'a>),

    /// Deferred query object with optional push-down.
    Executable(&'a dyn ExecutableSource<T>),
}

impl<'a, T> PagingSource<'a, T> {
    #[must_use]
    pub fn iter(iter: impl IntoIterator<Item = T, IntoIter: Send + 'a>) -> Self {
        Self::Iter(Box::new(iter.into_iter()))
    }

    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Slice(_) => SourceKind::Slice,
            Self::Iter(_) => SourceKind::Iter,
            Self::Executable(_) => SourceKind::Executable,
        }
    }
}

impl<'a, T> From<&'a [T]> for PagingSource<'a, T> {
    fn from(value: &'a [T]) -> Self {
        Self::Slice(value)
    }
}

impl<'a, T> From<&'a Vec<T>> for PagingSource<'a, T> {
    fn from(value: &'a Vec<T>) -> Self {
        Self::Slice(value.as_slice())
    }
}

impl<T> fmt::Debug for PagingSource<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slice(items) => f.debug_tuple("Slice").field(&items.len()).finish(),
            Self::Iter(_) => f.write_str("Iter"),
            Self::Executable(_) => f.write_str("Executable"),
        }
    }
}

///
/// SourceKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceKind {
    Slice,
    Iter,
    Executable,
}

///
/// TESTS
///

//! Module: paginator
//! Responsibility: bind validated options to a connection path and run requests.
//! Does not own: window arithmetic, cursor wire format, or source internals.

use crate::{
    arguments::{PagingArguments, RawPagingArguments},
    connection::{Connection, ConnectionBuilder},
    error::PagingError,
    obs::{GlobalMetricsSink, MetricsEvent, MetricsSink},
    options::PagingOptions,
    slice::{SlicedPage, slice_items, slice_source},
    source::{PagingSource, SourceKind},
};
use std::{fmt, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

///
/// Paginator
///
/// Validated options bound to one connection path. Every request is an
/// independent computation; a paginator may be shared freely across tasks.
///

#[derive(Clone)]
pub struct Paginator {
    path: &'static str,
    options: PagingOptions,
    sink: Arc<dyn MetricsSink>,
}

impl Paginator {
    /// Bind `options` to `path`, rejecting inconsistent page sizes.
    pub fn new(path: &'static str, options: PagingOptions) -> Result<Self, PagingError> {
        options.validate()?;

        Ok(Self {
            path,
            options,
            sink: Arc::new(GlobalMetricsSink),
        })
    }

    /// Route metrics events to `sink` instead of the process-wide counters.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub const fn options(&self) -> &PagingOptions {
        &self.options
    }

    /// Validate raw request arguments without touching any source.
    pub fn parse(&self, raw: &RawPagingArguments) -> Result<PagingArguments, PagingError> {
        PagingArguments::parse(raw, &self.options).map_err(|err| {
            warn!(path = self.path, kind = err.kind(), error = %err, "rejected paging arguments");
            self.sink.record(MetricsEvent::Rejected {
                path: self.path,
                kind: err.kind(),
            });

            PagingError::from(err)
        })
    }

    /// Produce one page from `source`.
    pub async fn paginate<T: Clone>(
        &self,
        source: PagingSource<'_, T>,
        raw: &RawPagingArguments,
    ) -> Result<Connection<T>, PagingError> {
        self.record_start(source.kind());
        let args = self.parse(raw)?;
        debug!(path = self.path, ?args, ?source, "paginating");

        let page = slice_source(source, &args, self.options.include_total_count)
            .await
            .map_err(|err| {
                warn!(path = self.path, error = %err, "paging source failed");
                self.sink
                    .record(MetricsEvent::SourceFailed { path: self.path });

                PagingError::from_source(err)
            })?;

        Ok(self.finish(page))
    }

    /// Produce one page from a materialized sequence without suspending.
    pub fn paginate_slice<T: Clone>(
        &self,
        items: &[T],
        raw: &RawPagingArguments,
    ) -> Result<Connection<T>, PagingError> {
        self.record_start(SourceKind::Slice);
        let args = self.parse(raw)?;
        let page = slice_items(items, &args, self.options.include_total_count);

        Ok(self.finish(page))
    }

    /// Like [`Self::paginate`], abandoning the request once `token` fires.
    ///
    /// The in-flight source call is dropped and no partial page is returned.
    pub async fn paginate_with_cancellation<T: Clone>(
        &self,
        source: PagingSource<'_, T>,
        raw: &RawPagingArguments,
        token: &CancellationToken,
    ) -> Result<Connection<T>, PagingError> {
        tokio::select! {
            biased;

            () = token.cancelled() => {
                warn!(path = self.path, "pagination cancelled");
                self.sink.record(MetricsEvent::Cancelled { path: self.path });

                Err(PagingError::Cancelled)
            }
            result = self.paginate(source, raw) => result,
        }
    }

    fn record_start(&self, source: SourceKind) {
        self.sink.record(MetricsEvent::PageStart {
            path: self.path,
            source,
        });
    }

    fn finish<T>(&self, page: SlicedPage<T>) -> Connection<T> {
        if let Some(strategy) = page.count_strategy {
            self.sink.record(MetricsEvent::CountComputed {
                path: self.path,
                strategy,
            });
        }

        let rows_returned = u64::try_from(page.slice.items.len()).unwrap_or(u64::MAX);
        self.sink.record(MetricsEvent::PageFinish {
            path: self.path,
            strategy: page.strategy,
            rows_returned,
        });

        ConnectionBuilder::new(page.slice)
            .total_count(page.total_count)
            .build()
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///

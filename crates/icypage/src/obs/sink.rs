//! Metrics sink boundary.
//!
//! Pagination logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::{obs::metrics, source::SourceKind};

///
/// SliceStrategy
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SliceStrategy {
    /// Window cut from a borrowed slice.
    InMemory,
    /// Lazy iterator consumed only up to the window's fetch limit.
    LazyProbe,
    /// Full sequence enumerated or executed, then sliced.
    Materialized,
    /// Source sliced natively.
    PushDown,
}

///
/// CountStrategy
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CountStrategy {
    PushDown,
    Enumerated,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    PageStart {
        path: &'static str,
        source: SourceKind,
    },
    PageFinish {
        path: &'static str,
        strategy: SliceStrategy,
        rows_returned: u64,
    },
    CountComputed {
        path: &'static str,
        strategy: CountStrategy,
    },
    Rejected {
        path: &'static str,
        kind: &'static str,
    },
    SourceFailed {
        path: &'static str,
    },
    Cancelled {
        path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default process-wide sink that writes into the global metrics state.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::PageStart { path, source: _ } => {
                metrics::with_state_mut(|m| {
                    m.ops.page_calls = m.ops.page_calls.saturating_add(1);
                    let entry = m.connections.entry(path.to_string()).or_default();
                    entry.page_calls = entry.page_calls.saturating_add(1);
                });
            }

            MetricsEvent::PageFinish {
                path,
                strategy,
                rows_returned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.pages_built = m.ops.pages_built.saturating_add(1);
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                    let counter = match strategy {
                        SliceStrategy::InMemory => &mut m.ops.slice_in_memory,
                        SliceStrategy::LazyProbe => &mut m.ops.slice_lazy_probe,
                        SliceStrategy::Materialized => &mut m.ops.slice_materialized,
                        SliceStrategy::PushDown => &mut m.ops.slice_push_down,
                    };
                    *counter = counter.saturating_add(1);

                    let entry = m.connections.entry(path.to_string()).or_default();
                    entry.pages_built = entry.pages_built.saturating_add(1);
                    entry.rows_returned = entry.rows_returned.saturating_add(rows_returned);
                    if strategy == SliceStrategy::PushDown {
                        entry.push_downs = entry.push_downs.saturating_add(1);
                    }
                });
            }

            MetricsEvent::CountComputed { path: _, strategy } => {
                metrics::with_state_mut(|m| match strategy {
                    CountStrategy::PushDown => {
                        m.ops.counts_pushed_down = m.ops.counts_pushed_down.saturating_add(1);
                    }
                    CountStrategy::Enumerated => {
                        m.ops.counts_enumerated = m.ops.counts_enumerated.saturating_add(1);
                    }
                });
            }

            MetricsEvent::Rejected { path, kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.rejected = m.ops.rejected.saturating_add(1);
                    let by_kind = m.rejections.entry(kind.to_string()).or_default();
                    *by_kind = by_kind.saturating_add(1);
                    let entry = m.connections.entry(path.to_string()).or_default();
                    entry.rejected = entry.rejected.saturating_add(1);
                });
            }

            MetricsEvent::SourceFailed { path: _ } => {
                metrics::with_state_mut(|m| {
                    m.ops.source_failures = m.ops.source_failures.saturating_add(1);
                });
            }

            MetricsEvent::Cancelled { path: _ } => {
                metrics::with_state_mut(|m| {
                    m.ops.cancelled = m.ops.cancelled.saturating_add(1);
                });
            }
        }
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

///
/// TESTS
///

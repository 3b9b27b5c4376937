//! Observability: pagination telemetry (metrics) and sink abstractions.
//!
//! Structured logs go through `tracing` at the call sites; this module only
//! owns counters.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{ConnectionCounters, ConnectionSummary, EventOps, EventReport, EventState};
pub use sink::{
    CountStrategy, GlobalMetricsSink, MetricsEvent, MetricsSink, SliceStrategy, metrics_report,
    metrics_reset_all,
};

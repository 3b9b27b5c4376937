use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::LazyLock,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for pagination requests.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub connections: BTreeMap<String, ConnectionCounters>,
    pub rejections: BTreeMap<String, u64>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            connections: BTreeMap::new(),
            rejections: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Entrypoints
    pub page_calls: u64,
    pub pages_built: u64,

    // Slice strategies
    pub slice_in_memory: u64,
    pub slice_lazy_probe: u64,
    pub slice_materialized: u64,
    pub slice_push_down: u64,

    // Rows
    pub rows_returned: u64,

    // Counts
    pub counts_pushed_down: u64,
    pub counts_enumerated: u64,

    // Failures
    pub rejected: u64,
    pub source_failures: u64,
    pub cancelled: u64,
}

///
/// ConnectionCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ConnectionCounters {
    pub page_calls: u64,
    pub pages_built: u64,
    pub rows_returned: u64,
    pub push_downs: u64,
    pub rejected: u64,
}

static EVENT_STATE: LazyLock<Mutex<EventState>> =
    LazyLock::new(|| Mutex::new(EventState::default()));

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    f(&EVENT_STATE.lock())
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    f(&mut EVENT_STATE.lock())
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Point-in-time metrics snapshot with per-connection summaries.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: Option<EventState>,
    pub connection_counters: Vec<ConnectionSummary>,
}

///
/// ConnectionSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ConnectionSummary {
    pub path: String,
    pub page_calls: u64,
    pub pages_built: u64,
    pub rows_returned: u64,
    pub push_downs: u64,
    pub rejected: u64,
    pub avg_rows_per_page: f64,
}

/// Build a metrics report from the in-memory counters.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut connection_counters: Vec<ConnectionSummary> = snap
        .connections
        .iter()
        .map(|(path, ops)| {
            let avg_rows_per_page = if ops.pages_built > 0 {
                ops.rows_returned as f64 / ops.pages_built as f64
            } else {
                0.0
            };

            ConnectionSummary {
                path: path.clone(),
                page_calls: ops.page_calls,
                pages_built: ops.pages_built,
                rows_returned: ops.rows_returned,
                push_downs: ops.push_downs,
                rejected: ops.rejected,
                avg_rows_per_page,
            }
        })
        .collect();

    connection_counters.sort_by(|a, b| {
        b.page_calls
            .cmp(&a.page_calls)
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        connection_counters,
    }
}

use crate::{
    arguments::PagingArguments,
    source::{ExecutableSource, PushDown, SliceResult, SourceError},
    window::PageWindow,
};
use async_trait::async_trait;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

/// The twelve-letter fixture sequence.
pub(crate) fn letters() -> Vec<&'static str> {
    vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]
}

///
/// VecExecutable
///
/// Deferred source that never pushes down; every call to `execute`
/// materializes the whole sequence.
///

pub(crate) struct VecExecutable<T> {
    items: Vec<T>,
    executions: AtomicUsize,
}

impl<T> VecExecutable<T> {
    pub(crate) const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            executions: AtomicUsize::new(0),
        }
    }

    pub(crate) fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> ExecutableSource<T> for VecExecutable<T> {
    async fn execute(&self) -> Result<Vec<T>, SourceError> {
        self.executions.fetch_add(1, Ordering::SeqCst);

        Ok(self.items.clone())
    }
}

///
/// RangeScanSource
///
/// Push-down source emulating a bounded range scan: it reads only the rows
/// the window can reach and counts natively.
///

pub(crate) struct RangeScanSource<T> {
    items: Vec<T>,
    count_push_down: bool,
    rows_scanned: AtomicUsize,
    executions: AtomicUsize,
}

impl<T> RangeScanSource<T> {
    pub(crate) const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            count_push_down: true,
            rows_scanned: AtomicUsize::new(0),
            executions: AtomicUsize::new(0),
        }
    }

    /// Same source, but declining count push-down.
    pub(crate) fn without_count(items: Vec<T>) -> Self {
        Self {
            count_push_down: false,
            ..Self::new(items)
        }
    }

    pub(crate) fn rows_scanned(&self) -> usize {
        self.rows_scanned.load(Ordering::SeqCst)
    }

    pub(crate) fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> ExecutableSource<T> for RangeScanSource<T> {
    async fn execute(&self) -> Result<Vec<T>, SourceError> {
        self.executions.fetch_add(1, Ordering::SeqCst);

        Ok(self.items.clone())
    }

    async fn try_slice(
        &self,
        args: &PagingArguments,
    ) -> Result<PushDown<SliceResult<T>>, SourceError> {
        let scan_len = PageWindow::fetch_limit(args)
            .map_or(self.items.len(), |limit| limit.min(self.items.len()));
        self.rows_scanned.fetch_add(scan_len, Ordering::SeqCst);

        let window = PageWindow::resolve(args, scan_len);
        let items = self.items[window.start..window.end].to_vec();

        Ok(PushDown::Handled(SliceResult::from_window(window, items)))
    }

    async fn try_count(&self) -> Result<Option<usize>, SourceError> {
        Ok(self.count_push_down.then_some(self.items.len()))
    }
}

///
/// CountFaultSource
///
/// Slices natively but its count query always fails.
///

pub(crate) struct CountFaultSource<T> {
    items: Vec<T>,
    executions: AtomicUsize,
}

impl<T> CountFaultSource<T> {
    pub(crate) const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            executions: AtomicUsize::new(0),
        }
    }

    pub(crate) fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> ExecutableSource<T> for CountFaultSource<T> {
    async fn execute(&self) -> Result<Vec<T>, SourceError> {
        self.executions.fetch_add(1, Ordering::SeqCst);

        Ok(self.items.clone())
    }

    async fn try_slice(
        &self,
        args: &PagingArguments,
    ) -> Result<PushDown<SliceResult<T>>, SourceError> {
        Ok(PushDown::Handled(SliceResult::from_slice(&self.items, args)))
    }

    async fn try_count(&self) -> Result<Option<usize>, SourceError> {
        Err("count query faulted".into())
    }
}

///
/// CountOnlySource
///
/// Declines slice push-down but reports its own count, which may differ
/// from what `execute` returns.
///

pub(crate) struct CountOnlySource<T> {
    items: Vec<T>,
    count: usize,
}

impl<T> CountOnlySource<T> {
    pub(crate) const fn new(items: Vec<T>, count: usize) -> Self {
        Self { items, count }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> ExecutableSource<T> for CountOnlySource<T> {
    async fn execute(&self) -> Result<Vec<T>, SourceError> {
        Ok(self.items.clone())
    }

    async fn try_count(&self) -> Result<Option<usize>, SourceError> {
        Ok(Some(self.count))
    }
}

///
/// FailingSource
///

pub(crate) struct FailingSource {
    pub(crate) fail_push_down: bool,
}

#[async_trait]
impl ExecutableSource<u32> for FailingSource {
    async fn execute(&self) -> Result<Vec<u32>, SourceError> {
        Err("backing query faulted".into())
    }

    async fn try_slice(
        &self,
        _args: &PagingArguments,
    ) -> Result<PushDown<SliceResult<u32>>, SourceError> {
        if self.fail_push_down {
            return Err("range scan faulted".into());
        }

        Ok(PushDown::NotHandled)
    }
}

///
/// PendingSource
///
/// Push-down source whose slice never resolves before the test deadline.
/// Records whether its in-flight call was dropped.
///

pub(crate) struct PendingSource {
    pub(crate) started: Arc<AtomicBool>,
    pub(crate) aborted: Arc<AtomicBool>,
}

impl PendingSource {
    pub(crate) fn new() -> Self {
        Self {
            started: Arc::new(AtomicBool::new(false)),
            aborted: Arc::new(AtomicBool::new(false)),
        }
    }
}

struct AbortFlag(Arc<AtomicBool>);

impl Drop for AbortFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ExecutableSource<u32> for PendingSource {
    async fn execute(&self) -> Result<Vec<u32>, SourceError> {
        Ok(Vec::new())
    }

    async fn try_slice(
        &self,
        _args: &PagingArguments,
    ) -> Result<PushDown<SliceResult<u32>>, SourceError> {
        self.started.store(true, Ordering::SeqCst);
        let guard = AbortFlag(Arc::clone(&self.aborted));
        tokio::time::sleep(Duration::from_secs(3600)).await;
        std::mem::forget(guard);

        Ok(PushDown::NotHandled)
    }
}

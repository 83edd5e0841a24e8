//! Worker-count resolution, chunking and progress reporting.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::Threads;

/// Concrete worker count for a [`Threads`] knob.
///
/// `Threads::All` asks the platform for its hardware thread count and falls
/// back to 1 when that is unavailable.
#[must_use]
pub fn resolve_thread_count(threads: Threads) -> usize {
    match threads {
        Threads::All => std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1),
        Threads::Count(n) => n.get(),
    }
}

/// Items per chunk when `len` items are spread over `parts` workers.
#[must_use]
pub fn chunk_size(len: usize, parts: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(parts.max(1))
    }
}

/// Contiguous, non-overlapping ranges that cover `0..len` in at most `parts` pieces.
#[must_use]
pub fn chunk_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    let size = chunk_size(len, parts);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

/// Snapshot of a running job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Units finished so far.
    pub completed: usize,
    /// Units in the whole job.
    pub total: usize,
}

/// Receives progress snapshots. Implementations must tolerate calls from
/// several worker threads.
pub trait ProgressObserver: Send + Sync {
    /// Called after each finished unit.
    fn on_progress(&self, progress: Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        self(progress);
    }
}

/// Default observer: logs each snapshot at `info` level when the `tracing`
/// feature is enabled, and does nothing otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress {
    /// Label attached to each event.
    pub label: &'static str,
}

impl ProgressObserver for LogProgress {
    fn on_progress(&self, progress: Progress) {
        #[cfg(feature = "tracing")]
        tracing::info!(
            label = self.label,
            completed = progress.completed,
            total = progress.total,
            "progress"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = progress;
    }
}

/// Iterator adapter returned by [`report_progress`].
pub struct ReportProgress<'a, I> {
    inner: I,
    completed: usize,
    total: usize,
    observer: Option<&'a dyn ProgressObserver>,
}

impl<I: Iterator> Iterator for ReportProgress<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.completed += 1;
        if let Some(observer) = self.observer {
            observer.on_progress(Progress {
                completed: self.completed,
                total: self.total,
            });
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Wrap an iterator so each yielded item notifies `observer` when `display`
/// is set. Items, their order and their count are never changed.
pub fn report_progress<'a, I>(
    iter: I,
    total: usize,
    display: bool,
    observer: &'a dyn ProgressObserver,
) -> ReportProgress<'a, I::IntoIter>
where
    I: IntoIterator,
{
    ReportProgress {
        inner: iter.into_iter(),
        completed: 0,
        total,
        observer: display.then_some(observer),
    }
}

/// Thread-safe progress counter for work finishing on several workers.
pub struct SharedProgress<'a> {
    completed: AtomicUsize,
    total: usize,
    observer: Option<&'a dyn ProgressObserver>,
}

impl<'a> SharedProgress<'a> {
    /// New counter; `observer` is only notified when `display` is set.
    #[must_use]
    pub fn new(total: usize, display: bool, observer: &'a dyn ProgressObserver) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            observer: display.then_some(observer),
        }
    }

    /// Record one finished unit.
    pub fn tick(&self) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(observer) = self.observer {
            observer.on_progress(Progress {
                completed,
                total: self.total,
            });
        }
    }

    /// Units finished so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

//! Progress reporting and cancellation for classification passes.
//!
//! The pass itself is synchronous and knows nothing about how progress is
//! shown. Callers plug in a [`ProgressReporter`]: a [`ProgressCounter`] they
//! can poll from another thread, a [`ChannelProgress`] that streams
//! [`ProgressEvent`]s, or any closure wrapped in [`FnProgress`].
//!
//! ```
//! use std::sync::Arc;
//! use rubrika::classify::progress::{ProgressCounter, ProgressReporter};
//!
//! let counter = Arc::new(ProgressCounter::new());
//! counter.on_start(4);
//! counter.on_record(1, 4);
//! assert_eq!(counter.completed(), 1);
//! assert_eq!(counter.fraction(), 0.25);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};

/// Default number of records between two channel progress events.
pub const DEFAULT_REPORT_INTERVAL: usize = 50;

/// Receives progress notifications from a classification pass.
///
/// In a parallel pass `on_record` is called from worker threads, in no
/// particular order; `completed` is the number of records finished so far.
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first record.
    fn on_start(&self, _total: usize) {}

    /// Called after each record.
    fn on_record(&self, completed: usize, total: usize);

    /// Called once after the last record of a pass that ran to completion.
    fn on_finish(&self, _total: usize) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_record(&self, _completed: usize, _total: usize) {}
}

/// Queryable progress counter.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    completed: AtomicUsize,
    total: AtomicUsize,
    finished: AtomicBool,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records finished so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Records in the current pass.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Acquire)
    }

    /// Completed share in `0.0..=1.0`; an empty pass counts as done.
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    /// Whether the last pass ran to completion.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

impl ProgressReporter for ProgressCounter {
    fn on_start(&self, total: usize) {
        self.finished.store(false, Ordering::Release);
        self.completed.store(0, Ordering::Release);
        self.total.store(total, Ordering::Release);
    }

    fn on_record(&self, completed: usize, _total: usize) {
        self.completed.fetch_max(completed, Ordering::AcqRel);
    }

    fn on_finish(&self, total: usize) {
        self.completed.store(total, Ordering::Release);
        self.finished.store(true, Ordering::Release);
    }
}

/// Progress notification sent over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    /// A pass over `total` records began.
    Started { total: usize },
    /// `completed` of `total` records are done.
    Advanced { completed: usize, total: usize },
    /// The pass ran to completion.
    Finished { total: usize },
}

/// Reporter that forwards events to a crossbeam channel.
///
/// `Advanced` events are throttled to one every `interval` records (plus the
/// last record). Send failures are ignored: a caller that dropped its
/// receiver simply stops hearing about progress.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
    interval: usize,
}

impl ChannelProgress {
    /// Create a reporter and the receiver that observes it.
    pub fn new() -> (Self, Receiver<ProgressEvent>) {
        let (sender, receiver) = unbounded();
        (
            ChannelProgress {
                sender,
                interval: DEFAULT_REPORT_INTERVAL,
            },
            receiver,
        )
    }

    /// Report every `interval` records (minimum 1).
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval.max(1);
        self
    }
}

impl ProgressReporter for ChannelProgress {
    fn on_start(&self, total: usize) {
        let _ = self.sender.send(ProgressEvent::Started { total });
    }

    fn on_record(&self, completed: usize, total: usize) {
        if completed % self.interval == 0 || completed == total {
            let _ = self.sender.send(ProgressEvent::Advanced { completed, total });
        }
    }

    fn on_finish(&self, total: usize) {
        let _ = self.sender.send(ProgressEvent::Finished { total });
    }
}

/// Adapts a closure `(completed, total)` into a reporter.
pub struct FnProgress<F>(pub F);

impl<F> ProgressReporter for FnProgress<F>
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_record(&self, completed: usize, total: usize) {
        (self.0)(completed, total)
    }
}

/// Shared flag used to stop a running pass between records.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

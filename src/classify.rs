//! Classification passes over single comments, batches and whole datasets.
//!
//! - [`classifier::Classifier`] - normalizer plus swappable matcher
//! - [`options::ClassifyOptions`] / [`options::Execution`] - per-pass settings
//! - [`progress`] - progress hooks and cancellation
//! - [`summary::ClassificationSummary`] - counts reported after a pass

pub mod classifier;
pub mod options;
pub mod progress;
pub mod summary;

pub use classifier::Classifier;
pub use options::{ClassifyOptions, Execution};
pub use progress::{
    CancellationToken, ChannelProgress, FnProgress, NoProgress, ProgressCounter, ProgressEvent,
    ProgressReporter,
};
pub use summary::{CategoryCount, ClassificationSummary};

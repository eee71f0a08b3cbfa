//! Options for a single classification pass.

use std::fmt;
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::classify::progress::{CancellationToken, NoProgress, ProgressReporter};
use crate::error::{Result, RubrikaError};

/// How records are distributed over threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// One record after another on the calling thread.
    #[default]
    Sequential,
    /// Records are classified on a rayon pool.
    ///
    /// `threads: None` uses the global pool; `Some(n)` builds a dedicated
    /// pool of `n` threads for the duration of the pass.
    Parallel { threads: Option<usize> },
}

impl Execution {
    /// Parallel execution on one thread per CPU.
    pub fn parallel() -> Self {
        Execution::Parallel { threads: None }
    }

    /// Parallel execution on a dedicated pool.
    pub fn with_threads(threads: usize) -> Self {
        Execution::Parallel {
            threads: Some(threads),
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Execution::Parallel { .. })
    }

    /// Build the dedicated pool, if one was asked for.
    pub(crate) fn thread_pool(&self) -> Result<Option<ThreadPool>> {
        match self {
            Execution::Parallel {
                threads: Some(threads),
            } => {
                if *threads == 0 {
                    return Err(RubrikaError::configuration(
                        "Thread count must be at least 1",
                    ));
                }
                let pool = ThreadPoolBuilder::new()
                    .num_threads(*threads)
                    .thread_name(|i| format!("rubrika-classify-{i}"))
                    .build()
                    .map_err(|e| {
                        RubrikaError::internal(format!("Failed to create thread pool: {e}"))
                    })?;
                Ok(Some(pool))
            }
            _ => Ok(None),
        }
    }
}

/// Per-pass settings: execution strategy, progress hook and cancellation.
#[derive(Clone, Default)]
pub struct ClassifyOptions {
    pub execution: Execution,
    progress: Option<Arc<dyn ProgressReporter>>,
    cancellation: Option<CancellationToken>,
}

impl ClassifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Notify `progress` as records complete.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Stop the pass once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn progress(&self) -> &dyn ProgressReporter {
        match &self.progress {
            Some(progress) => progress.as_ref(),
            None => &NoProgress,
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

impl fmt::Debug for ClassifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifyOptions")
            .field("execution", &self.execution)
            .field("progress", &self.progress.is_some())
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_pool() {
        assert!(Execution::Sequential.thread_pool().unwrap().is_none());
        assert!(Execution::parallel().thread_pool().unwrap().is_none());

        let pool = Execution::with_threads(2).thread_pool().unwrap().unwrap();
        assert_eq!(pool.current_num_threads(), 2);

        let err = Execution::with_threads(0).thread_pool().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_execution_serde() {
        let json = serde_json::to_string(&Execution::Sequential).unwrap();
        assert_eq!(json, "\"sequential\"");

        let parsed: Execution = serde_json::from_str(r#"{"parallel":{"threads":4}}"#).unwrap();
        assert_eq!(parsed, Execution::with_threads(4));
    }

    #[test]
    fn test_options_cancellation() {
        let token = CancellationToken::new();
        let options = ClassifyOptions::new().with_cancellation(token.clone());
        assert!(!options.is_cancelled());

        token.cancel();
        assert!(options.is_cancelled());
        assert!(!ClassifyOptions::new().is_cancelled());
    }
}

//! Per-document constraint enforcement.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};

use crate::error::{Error, Result};

/// Processing ceilings applied to every document.
#[derive(Debug, Clone)]
pub struct GuardLimits {
    /// Maximum decoded page count before the document is rejected
    pub max_pages: u32,
    /// Wall-clock budget for one document's full pipeline
    pub timeout: Duration,
}

impl GuardLimits {
    /// Create limits with the default ceilings (50 pages, 10 seconds).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page ceiling.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the wall-clock budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GuardLimits {
    fn default() -> Self {
        Self {
            max_pages: 50,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Run a document job under a wall-clock budget.
///
/// The job runs on its own worker thread; when the budget expires, the
/// thread is abandoned along with whatever partial state it holds and a
/// [`Error::Timeout`] is returned. The caller never observes a truncated
/// result.
pub(crate) fn run_with_budget<T, F>(timeout: Duration, job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = bounded(1);

    thread::Builder::new()
        .name("outpdf-document".to_string())
        .spawn(move || {
            let _ = tx.send(job());
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(Error::Timeout { limit: timeout }),
        Err(RecvTimeoutError::Disconnected) => Err(Error::Other(
            "document worker exited without a result".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_job_completes() {
        let result = run_with_budget(Duration::from_secs(5), || Ok(42u32));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_slow_job_times_out() {
        let result: Result<u32> = run_with_budget(Duration::from_millis(50), || {
            thread::sleep(Duration::from_secs(5));
            Ok(1)
        });
        assert!(matches!(result, Err(Error::Timeout { .. })));
    }

    #[test]
    fn test_job_error_propagates() {
        let result: Result<u32> = run_with_budget(Duration::from_secs(5), || {
            Err(Error::Other("boom".to_string()))
        });
        assert!(matches!(result, Err(Error::Other(_))));
    }

    #[test]
    fn test_default_limits() {
        let limits = GuardLimits::default();
        assert_eq!(limits.max_pages, 50);
        assert_eq!(limits.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_limits_builder() {
        let limits = GuardLimits::new()
            .with_max_pages(10)
            .with_timeout(Duration::from_secs(2));
        assert_eq!(limits.max_pages, 10);
        assert_eq!(limits.timeout, Duration::from_secs(2));
    }
}

//! Deadline supervision for search attempts

use crate::error::{SearchError, SearchResult};
use std::time::Duration;

/// Run a CPU-bound search attempt under a wall-clock deadline
///
/// The work runs on the blocking pool; on expiry the join handle is
/// dropped and `None` is returned. The worker is abandoned, not killed:
/// it may keep running to completion, so it must only touch state owned
/// by the attempt itself.
pub async fn run_with_deadline<T, F>(budget: Duration, work: F) -> SearchResult<Option<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(work);
    match tokio::time::timeout(budget, handle).await {
        Ok(Ok(value)) => Ok(Some(value)),
        Ok(Err(join_error)) => Err(SearchError::Worker(join_error.to_string())),
        Err(_elapsed) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fast_work_completes() {
        let result = run_with_deadline(Duration::from_secs(5), || 21 * 2)
            .await
            .unwrap();
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_slow_work_times_out_within_margin() {
        let budget = Duration::from_millis(50);
        let started = Instant::now();

        let result = run_with_deadline(budget, || {
            std::thread::sleep(Duration::from_secs(2));
            0
        })
        .await
        .unwrap();

        assert_eq!(result, None);
        // Expiry must not wait for the abandoned worker
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_zero_budget_times_out() {
        let result = run_with_deadline(Duration::ZERO, || {
            std::thread::sleep(Duration::from_millis(200));
            1
        })
        .await
        .unwrap();
        assert_eq!(result, None);
    }
}

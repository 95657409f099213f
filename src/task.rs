//! Polling of background tasks from the UI thread.

use futures::FutureExt;
use tokio::task::JoinHandle;

/// Outcome of polling an optional task handle
pub enum PollResult<T> {
    /// Nothing is running
    NoTask,
    /// Still running
    Pending,
    /// Finished; the handle has been taken. `Err` means the task panicked.
    Complete(Result<T, tokio::task::JoinError>),
}

/// Check a task once per frame without blocking.
///
/// ```ignore
/// match poll_task(&mut self.task) {
///     PollResult::Complete(Ok(post)) => { /* store post */ }
///     PollResult::Complete(Err(e)) => { /* task panicked */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_task<T>(task: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    match task {
        None => PollResult::NoTask,
        Some(handle) if !handle.is_finished() => PollResult::Pending,
        Some(_) => {
            let Some(handle) = task.take() else {
                return PollResult::NoTask;
            };
            match handle.now_or_never() {
                Some(result) => PollResult::Complete(result),
                None => {
                    tracing::warn!("Task not ready despite is_finished()");
                    PollResult::Pending
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_task() {
        let mut task: Option<JoinHandle<()>> = None;
        assert!(matches!(poll_task(&mut task), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_completed_task_is_taken() {
        let mut task = Some(tokio::spawn(async { 7 }));
        while matches!(poll_task_peek(&task), Some(false)) {
            tokio::task::yield_now().await;
        }

        match poll_task(&mut task) {
            PollResult::Complete(Ok(value)) => assert_eq!(value, 7),
            _ => panic!("task should be complete"),
        }
        assert!(task.is_none());
        assert!(matches!(poll_task(&mut task), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_panicked_task_reports_join_error() {
        let mut task: Option<JoinHandle<()>> = Some(tokio::spawn(async { panic!("boom") }));
        while matches!(poll_task_peek(&task), Some(false)) {
            tokio::task::yield_now().await;
        }

        assert!(matches!(poll_task(&mut task), PollResult::Complete(Err(_))));
    }

    fn poll_task_peek<T>(task: &Option<JoinHandle<T>>) -> Option<bool> {
        task.as_ref().map(|h| h.is_finished())
    }
}

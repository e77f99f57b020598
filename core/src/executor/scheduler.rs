use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

use super::types::{Task, TaskResult};

/// Execute one parallel group: fan out every member, join all before
/// returning (no fail-fast; a task's failure never cancels its siblings).
///
/// `max_parallel` bounds how many tasks run simultaneously; `None`
/// dispatches the whole group at once.
pub(crate) async fn execute_group_parallel<F, Fut>(
    tasks: Vec<Task>,
    max_parallel: Option<usize>,
    run_fn: F,
) -> Vec<TaskResult>
where
    F: Fn(Task) -> Fut + Clone + Send + 'static,
    Fut: std::future::Future<Output = TaskResult> + Send,
{
    let sem = max_parallel.map(|n| Arc::new(Semaphore::new(n.max(1))));
    let mut futs: FuturesUnordered<_> = FuturesUnordered::new();

    for task in tasks {
        let sem = sem.clone();
        let run = run_fn.clone();

        futs.push(async move {
            let _permit = match sem {
                // The semaphore is never closed, so acquisition only fails
                // if the run is torn down; running unthrottled is the safe
                // fallback.
                Some(sem) => sem.acquire_owned().await.ok(),
                None => None,
            };

            run(task).await
        });
    }

    let mut results = Vec::with_capacity(futs.len());
    while let Some(result) = futs.next().await {
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn result_for(task: &Task) -> TaskResult {
        let now = Local::now();
        TaskResult {
            step: task.step,
            success: true,
            output: String::new(),
            error: None,
            started_at: now,
            ended_at: now,
            duration_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_all_tasks_complete() {
        let tasks: Vec<Task> = (1..=5).map(|step| Task::new(step, "Agent")).collect();

        let results =
            execute_group_parallel(tasks, None, |task| async move { result_for(&task) }).await;

        let mut steps: Vec<u32> = results.iter().map(|r| r.step).collect();
        steps.sort_unstable();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_semaphore_bounds_concurrency() {
        let tasks: Vec<Task> = (1..=8).map(|step| Task::new(step, "Agent")).collect();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let active_c = active.clone();
        let peak_c = peak.clone();
        let results = execute_group_parallel(tasks, Some(2), move |task| {
            let active = active_c.clone();
            let peak = peak_c.clone();
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                result_for(&task)
            }
        })
        .await;

        assert_eq!(results.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}

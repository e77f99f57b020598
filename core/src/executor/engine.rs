use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use uuid::Uuid;

use crate::error::ExecutorError;

use super::context::build_dependency_context;
use super::graph::TaskGraph;
use super::plan::ExecutionPlan;
use super::scheduler::execute_group_parallel;
use super::traits::{ExecutionEvent, ExecutionObserver, TaskRunner};
use super::types::{
    ExecutionOpts, ExecutionResult, Task, TaskResult, ACTION_AGENT, PARAM_QUERY,
};

/// Execution engine for task dependency graphs.
///
/// Walks the plan level by level with a full barrier between levels: level
/// N+1 never starts before every task of level N completed, so later tasks
/// can consume earlier outputs as context. Parallel groups fan out and join;
/// a failing task never cancels siblings or later levels.
pub struct ExecutionEngine {
    runner: Arc<dyn TaskRunner>,
    opts: ExecutionOpts,
    observer: Option<Arc<dyn ExecutionObserver>>,
}

impl ExecutionEngine {
    pub fn new(runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            runner,
            opts: ExecutionOpts::default(),
            observer: None,
        }
    }

    pub fn with_opts(mut self, opts: ExecutionOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Execute all tasks following the dependency-based execution plan.
    ///
    /// Always returns a well-formed [`ExecutionResult`]; per-task errors are
    /// converted into failed task results and never propagate out. A task
    /// set that fails structural validation returns immediately with the
    /// validator's errors and no results.
    pub async fn execute(&self, tasks: &[Task]) -> ExecutionResult {
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();

        let graph = TaskGraph::from_tasks(tasks);
        let validation = graph.validate();
        if !validation.is_valid {
            tracing::warn!(
                run_id = %run_id,
                errors = validation.errors.len(),
                "task graph failed validation"
            );
            return ExecutionResult {
                success: false,
                results: Vec::new(),
                total_duration_ms: start.elapsed().as_millis() as u64,
                parallel_executions: 0,
                sequential_executions: 0,
                errors: validation.errors,
            };
        }

        let plan = ExecutionPlan::build(&graph);
        tracing::info!(
            run_id = %run_id,
            tasks = tasks.len(),
            levels = plan.total_levels,
            "starting execution"
        );
        self.notify(&ExecutionEvent::RunStarted {
            run_id: run_id.clone(),
            total_tasks: graph.len(),
            total_levels: plan.total_levels,
        });
        self.notify(&ExecutionEvent::PlanReady {
            run_id: run_id.clone(),
            plan: plan.clone(),
        });

        let mut results: BTreeMap<u32, TaskResult> = BTreeMap::new();
        let mut parallel_executions = 0;
        let mut sequential_executions = 0;
        // Reserved for failures outside the per-task boundary.
        let errors: Vec<String> = Vec::new();

        for group in &plan.groups {
            self.notify(&ExecutionEvent::LevelStarted {
                run_id: run_id.clone(),
                level: group.level,
                steps: group.tasks.iter().map(|t| t.step).collect(),
                parallel: group.can_run_in_parallel,
            });

            let group_results = if group.can_run_in_parallel {
                parallel_executions += 1;
                self.execute_group(group.tasks.clone(), group.level, &results, &run_id)
                    .await
            } else {
                sequential_executions += 1;
                let mut out = Vec::with_capacity(group.tasks.len());
                for task in &group.tasks {
                    let result = run_single_task(
                        task.clone(),
                        group.level,
                        Arc::new(results.clone()),
                        self.runner.clone(),
                        run_id.clone(),
                        self.observer.clone(),
                    )
                    .await;
                    out.push(result);
                }
                out
            };

            // Barrier: results become visible to later levels only here.
            for result in group_results {
                results.insert(result.step, result);
            }

            self.notify(&ExecutionEvent::LevelCompleted {
                run_id: run_id.clone(),
                level: group.level,
            });
        }

        let results: Vec<TaskResult> = results.into_values().collect();
        let success = results.iter().all(|r| r.success) && errors.is_empty();
        let total_duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            run_id = %run_id,
            success,
            duration_ms = total_duration_ms,
            "execution finished"
        );

        let result = ExecutionResult {
            success,
            results,
            total_duration_ms,
            parallel_executions,
            sequential_executions,
            errors,
        };

        self.notify(&ExecutionEvent::RunCompleted {
            run_id,
            result: result.clone(),
        });

        result
    }

    /// Fan out one parallel group and join all members.
    async fn execute_group(
        &self,
        tasks: Vec<Task>,
        level: u32,
        prev_results: &BTreeMap<u32, TaskResult>,
        run_id: &str,
    ) -> Vec<TaskResult> {
        let prev = Arc::new(prev_results.clone());
        let runner = self.runner.clone();
        let observer = self.observer.clone();
        let run_id = run_id.to_string();

        execute_group_parallel(tasks, self.opts.max_parallel, move |task| {
            run_single_task(
                task,
                level,
                prev.clone(),
                runner.clone(),
                run_id.clone(),
                observer.clone(),
            )
        })
        .await
    }

    fn notify(&self, event: &ExecutionEvent) {
        if let Some(observer) = &self.observer {
            observer.notify(event);
        }
    }
}

/// Execute a single task. Every error raised here (missing parameter,
/// unsupported action, runner failure) is caught and converted into a
/// failed [`TaskResult`].
async fn run_single_task(
    task: Task,
    level: u32,
    prev_results: Arc<BTreeMap<u32, TaskResult>>,
    runner: Arc<dyn TaskRunner>,
    run_id: String,
    observer: Option<Arc<dyn ExecutionObserver>>,
) -> TaskResult {
    let started_at = Local::now();
    let timer = Instant::now();
    let step = task.step;

    tracing::debug!(run_id = %run_id, step, action = %task.action, "executing task");
    if let Some(observer) = &observer {
        observer.notify(&ExecutionEvent::TaskStarted {
            run_id: run_id.clone(),
            step,
            level,
        });
    }

    let outcome = dispatch_action(&task, &prev_results, runner).await;

    let ended_at = Local::now();
    let duration_ms = timer.elapsed().as_millis() as u64;

    let result = match outcome {
        Ok(output) => {
            tracing::debug!(run_id = %run_id, step, duration_ms, "task completed");
            TaskResult {
                step,
                success: true,
                output,
                error: None,
                started_at,
                ended_at,
                duration_ms,
            }
        }
        Err(err) => {
            tracing::warn!(run_id = %run_id, step, duration_ms, error = %err, "task failed");
            TaskResult {
                step,
                success: false,
                output: String::new(),
                error: Some(err.to_string()),
                started_at,
                ended_at,
                duration_ms,
            }
        }
    };

    if let Some(observer) = &observer {
        observer.notify(&ExecutionEvent::TaskCompleted {
            run_id,
            result: result.clone(),
        });
    }

    result
}

/// Resolve the task's action and hand it to the runner collaborator.
async fn dispatch_action(
    task: &Task,
    prev_results: &BTreeMap<u32, TaskResult>,
    runner: Arc<dyn TaskRunner>,
) -> Result<String, ExecutorError> {
    match task.action.as_str() {
        ACTION_AGENT => {
            let context = build_dependency_context(task, prev_results);
            let query = task
                .find_param(PARAM_QUERY)
                .ok_or(ExecutorError::MissingParameter {
                    name: PARAM_QUERY,
                    action: ACTION_AGENT,
                })?;

            let instruction = if context.is_empty() {
                query.to_string()
            } else {
                format!("{}\n\nCurrent task: {}", context, query)
            };

            runner
                .run(&instruction)
                .await
                .map_err(|e| ExecutorError::Runner(e.to_string()))
        }
        other => Err(ExecutorError::UnsupportedAction(other.to_string())),
    }
}

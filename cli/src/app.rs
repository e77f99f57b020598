use std::sync::Arc;

use planwise_core::config::AppConfig;
use planwise_core::error::{CliError, PlannerError};
use planwise_core::executor::{
    execution_report, ExecutionEngine, ExecutionObserver, ExecutionPlan, TaskGraph, TaskPlanner,
};
use planwise_core::{ExecutionOpts, Task};
use planwise_plugins::llm::ChatClient;
use planwise_plugins::{AgentTaskRunner, ConsoleReporter, ProgressReporter, StructuredPlanner};

use crate::cli::{InputArgs, OutputFormat, PlanArgs, RunArgs};

/// Print the execution plan for a task list without running it.
pub async fn plan_cmd(args: PlanArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let tasks = resolve_tasks(&args.input, cfg).await?;

    let graph = TaskGraph::from_tasks(&tasks);
    if let Some(code) = report_validation_errors(&graph) {
        return Ok(code);
    }

    let plan = ExecutionPlan::build(&graph);
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan).map_err(anyhow::Error::from)?);
        }
        OutputFormat::Text if args.mermaid => {
            println!("{}", plan.to_mermaid(&tasks));
        }
        OutputFormat::Text => {
            println!("{}", plan.describe());
        }
    }

    Ok(0)
}

/// Resolve the task list, execute it, and print the final report.
pub async fn run_cmd(args: RunArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let tasks = resolve_tasks(&args.input, cfg).await?;

    let graph = TaskGraph::from_tasks(&tasks);
    if let Some(code) = report_validation_errors(&graph) {
        return Ok(code);
    }

    if args.show_plan && args.format == OutputFormat::Text {
        println!("{}", ExecutionPlan::build(&graph).describe());
    }

    let client =
        ChatClient::from_config(&cfg.llm).map_err(|e| CliError::Config(e.to_string()))?;
    let runner = Arc::new(AgentTaskRunner::new(client));

    let opts = ExecutionOpts {
        max_parallel: args.max_parallel.or(cfg.executor.max_parallel),
    };

    let mut engine = ExecutionEngine::new(runner).with_opts(opts);
    // Event lines would corrupt json output, so only progress bars (drawn
    // to stderr) are allowed there.
    let observer = select_observer(&args, cfg);
    if let Some(observer) = observer {
        engine = engine.with_observer(observer);
    }

    let result = engine.execute(&tasks).await;

    match args.format {
        OutputFormat::Text => {
            println!("{}", execution_report(&result));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result).map_err(anyhow::Error::from)?);
        }
    }

    Ok(if result.success { 0 } else { 1 })
}

fn select_observer(args: &RunArgs, cfg: &AppConfig) -> Option<Arc<dyn ExecutionObserver>> {
    if args.quiet {
        return None;
    }
    if args.progress || cfg.executor.progress_bar {
        return Some(Arc::new(ProgressReporter::new(true)));
    }
    if args.format == OutputFormat::Json {
        return None;
    }
    Some(Arc::new(ConsoleReporter::new()))
}

/// Load tasks from the given file, or ask the planner to derive them from
/// the prompt.
async fn resolve_tasks(input: &InputArgs, cfg: &AppConfig) -> Result<Vec<Task>, CliError> {
    if let Some(path) = &input.file {
        let raw = std::fs::read_to_string(path)?;
        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .map_err(|e| CliError::Planner(PlannerError::InvalidPlan(e.to_string())))?;
        return Ok(tasks);
    }

    let prompt = input
        .prompt
        .as_deref()
        .ok_or_else(|| CliError::Command("no prompt or file given".to_string()))?;

    let client =
        ChatClient::from_config(&cfg.llm).map_err(|e| CliError::Config(e.to_string()))?;
    let planner = StructuredPlanner::new(client);
    let tasks = planner
        .plan(prompt)
        .await
        .map_err(|e| CliError::Planner(PlannerError::Plugin(e)))?;

    tracing::info!(tasks = tasks.len(), "planner resolved task list");
    Ok(tasks)
}

fn report_validation_errors(graph: &TaskGraph) -> Option<i32> {
    let validation = graph.validate();
    if validation.is_valid {
        return None;
    }
    eprintln!("Task graph is invalid:");
    for error in &validation.errors {
        eprintln!("  - {}", error);
    }
    Some(2)
}

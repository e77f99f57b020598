use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "planwise",
    version,
    about = "Plan task dependency graphs and execute them level by level"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build and print the execution plan without running anything
    Plan(PlanArgs),
    /// Plan (or load) a task list and execute it
    Run(RunArgs),
}

/// Task source: exactly one of a free-form prompt or a JSON task file.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Free-form request, turned into tasks by the planner
    #[arg(long)]
    pub prompt: Option<String>,

    /// JSON file holding a task array
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Render the plan as a Mermaid flowchart instead of text
    #[arg(long)]
    pub mermaid: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Cap on concurrently running tasks within a level
    #[arg(long)]
    pub max_parallel: Option<usize>,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Live progress bars instead of per-event lines
    #[arg(long)]
    pub progress: bool,

    /// Suppress per-event output (final report still prints)
    #[arg(long)]
    pub quiet: bool,

    /// Print the execution plan before running
    #[arg(long)]
    pub show_plan: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_parses_prompt_and_flags() {
        let args = Args::parse_from([
            "planwise",
            "run",
            "--prompt",
            "do things",
            "--max-parallel",
            "3",
            "--quiet",
        ]);
        match args.command {
            Commands::Run(run) => {
                assert_eq!(run.input.prompt.as_deref(), Some("do things"));
                assert_eq!(run.max_parallel, Some(3));
                assert!(run.quiet);
                assert_eq!(run.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_plan_requires_an_input_source() {
        let result = Args::try_parse_from(["planwise", "plan"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prompt_and_file_are_mutually_exclusive() {
        let result = Args::try_parse_from([
            "planwise",
            "plan",
            "--prompt",
            "x",
            "--file",
            "tasks.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_mermaid_flag() {
        let args = Args::parse_from(["planwise", "plan", "--file", "t.json", "--mermaid"]);
        match args.command {
            Commands::Plan(plan) => {
                assert!(plan.mermaid);
                assert_eq!(plan.input.file.as_deref().unwrap().to_str(), Some("t.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

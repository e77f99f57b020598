use clap::Parser;

mod app;
mod cli;

use planwise_core::config::{self, LoggingConfig};
use planwise_core::error::CliError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = config::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(CliError::Command)?;

    match args.command {
        cli::Commands::Plan(plan_args) => app::plan_cmd(plan_args, &cfg).await,
        cli::Commands::Run(run_args) => app::run_cmd(run_args, &cfg).await,
    }
}

// 0: success
// 1: execution finished with failed tasks, or an uncategorized error
// 2: bad input (invalid task graph, malformed file, config error)
fn exit_code_for_error(e: &CliError) -> i32 {
    match e {
        CliError::Planner(_) => 2,
        CliError::Config(_) => 2,
        CliError::Command(_) => 2,
        CliError::Io(_) => 2,
        CliError::Anyhow(_) => 1,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("planwise"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("planwise.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging
        .console
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_input_errors_exit_with_2() {
        assert_eq!(exit_code_for_error(&CliError::Config("no api key".into())), 2);
        assert_eq!(exit_code_for_error(&CliError::Command("bad flag".into())), 2);
        assert_eq!(
            exit_code_for_error(&CliError::Planner(
                planwise_core::error::PlannerError::InvalidPlan("not json".into())
            )),
            2
        );
    }

    #[test]
    fn test_uncategorized_errors_exit_with_1() {
        assert_eq!(
            exit_code_for_error(&CliError::Anyhow(anyhow::anyhow!("boom"))),
            1
        );
    }
}

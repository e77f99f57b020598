use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("planner failed: {0}")]
    Planner(#[from] PlannerError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("llm request failed: {0}")]
    Request(String),
    #[error("invalid plan structure: {0}")]
    InvalidPlan(String),
    #[error("plugin error: {0}")]
    Plugin(#[from] anyhow::Error),
}

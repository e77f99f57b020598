pub mod load;
pub mod types;

pub use load::{get_planwise_data_dir, load_default};
pub use types::{AppConfig, ExecutorConfig, LlmConfig, LoggingConfig};

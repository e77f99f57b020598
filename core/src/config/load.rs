use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Default planwise data directory: ~/.planwise
pub fn get_planwise_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".planwise"))
}

/// Load the app config: ~/.planwise/config.toml first, then ./config.toml,
/// then built-in defaults.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let data_dir = get_planwise_data_dir()?;
    let user_config = data_dir.join("config.toml");
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // File logging without an explicit directory lands under the data dir.
    if cfg.logging.file && cfg.logging.directory.as_deref().map_or(true, |d| d.trim().is_empty()) {
        let logs_dir = data_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    Ok(cfg)
}

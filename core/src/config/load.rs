use std::path::{Path, PathBuf};

use super::env_file::parse_env_file;
use super::types::AppConfig;

pub const API_KEY_ENV: &str = "BRAINTRUST_API_KEY";

/// Get the default evdump data directory: ~/.evdump
pub fn get_evdump_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".evdump"))
}

pub fn load_default(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut cfg = match explicit {
        // Priority 1: --config <path>; a missing explicit file is an error
        Some(path) => read_config(path)?,
        None => {
            // Priority 2: ~/.evdump/config.toml, then ./config.toml
            let home_config = get_evdump_data_dir().ok().map(|d| d.join("config.toml"));
            let local_config = Path::new("config.toml");
            match home_config.filter(|p| p.exists()) {
                Some(path) => read_config(&path)?,
                None if local_config.exists() => read_config(local_config)?,
                None => AppConfig::default(),
            }
        }
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

fn apply_env_overrides(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("EVDUMP_BASE_URL") {
        cfg.api.base_url = v;
    }
    if let Some(v) = non_empty("EVDUMP_OUTPUT_DIR") {
        cfg.export.output_dir = v;
    }
}

/// Resolve the bearer token: process environment first, then the `.env` file,
/// then the config file. Returns `None` when every source is blank.
pub fn resolve_api_key(cfg: &AppConfig, env_file: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(v) = std::env::var(API_KEY_ENV).ok().filter(|v| !v.trim().is_empty()) {
        return Ok(Some(v));
    }

    if let Some(path) = env_file.filter(|p| p.exists()) {
        let from_file = parse_env_file(path)?
            .into_iter()
            .find(|(k, v)| k == API_KEY_ENV && !v.trim().is_empty())
            .map(|(_, v)| v);
        if from_file.is_some() {
            return Ok(from_file);
        }
    }

    let configured = cfg.api.api_key.trim();
    Ok((!configured.is_empty()).then(|| configured.to_string()))
}

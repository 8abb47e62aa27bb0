use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "CHAT_SEARCH_HOME";

const APP_DIR_NAME: &str = "chat-search";

/// Resolve the directory holding persisted state (search history)
///
/// `$CHAT_SEARCH_HOME` wins when set and non-empty, otherwise the platform
/// data directory joined with `chat-search`.
pub fn get_data_dir() -> Result<PathBuf> {
    resolve_data_dir(env::var_os(HOME_ENV).map(PathBuf::from), dirs::data_dir())
}

fn resolve_data_dir(override_dir: Option<PathBuf>, platform: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    let base = platform.context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

//! Where the session database lives on disk.

use crate::errors::AppResult;
use std::fs;
use std::path::PathBuf;

/// `~/...` is taken from the home directory, anything else as given.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Configured database path, expanded, with its parent directory created.
pub fn prepare_db_path(configured: &str) -> AppResult<String> {
    let path = expand_tilde(configured.trim());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(path.to_string_lossy().into_owned())
}

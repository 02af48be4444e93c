pub mod check;
pub mod deploy;

use std::path::PathBuf;

use anyhow::{Context, Result};

use resdeploy_core::settings::DEFAULT_FILE;

/// Resolve the settings document path: explicit flag, else `settings.json`
/// in the current directory.
pub(crate) fn settings_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => {
            let cwd = std::env::current_dir().context("could not determine current directory")?;
            Ok(cwd.join(DEFAULT_FILE))
        }
    }
}

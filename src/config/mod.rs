pub mod models;

use crate::constants;
use crate::error::Error;
use models::CompilerConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a compiler configuration from a TOML file.
///
/// Keys absent from the file keep their defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: &Path) -> Result<CompilerConfig, Error> {
    let content = std::fs::read_to_string(path)?;
    let config: CompilerConfig = toml::from_str(&content)?;
    debug!(
        target: "oastool::config",
        path = %path.display(),
        content_types = ?config.content_types,
        "Loaded configuration"
    );
    Ok(config)
}

/// Resolves the configuration for a run: an explicit path wins over
/// `OASTOOL_CONFIG`, and with neither the defaults apply.
///
/// # Errors
///
/// Returns an error if the selected file cannot be loaded.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CompilerConfig, Error> {
    let from_env = std::env::var_os(constants::ENV_OASTOOL_CONFIG).map(PathBuf::from);
    match explicit.map(Path::to_path_buf).or(from_env) {
        Some(path) => load_config(&path),
        None => Ok(CompilerConfig::default()),
    }
}

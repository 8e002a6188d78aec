//! Configuration loading and discovery for `atlaspack.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{PackConfig, PackMode};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "atlaspack.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse atlaspack.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub mode: Option<PackMode>,
    /// Override output directory
    pub out: Option<PathBuf>,
    pub extension: Option<String>,
    pub manifest: Option<String>,
    pub atlas_name: Option<String>,
    pub strict: Option<bool>,
    pub include_hidden: Option<bool>,
    pub pretty: Option<bool>,
}

/// Find atlaspack.toml by walking up from `start`.
///
/// # Returns
/// - `Some(path)` if a config file is found in `start` or one of its ancestors
/// - `None` if no config file is found
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration for an assets root.
///
/// An explicit `path` must exist. Otherwise the config is discovered by
/// walking up from `root`; when none is found the defaults are used.
pub fn load_config(path: Option<&Path>, root: &Path) -> Result<PackConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let start = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
            find_config_from(start)
        }
    };

    match config_path {
        Some(p) => {
            log::debug!("Using config: {}", p.display());
            load_config_file(&p)
        }
        None => {
            log::debug!("No {} found, using defaults", CONFIG_FILE);
            Ok(PackConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
///
/// Values are not validated here; CLI overrides may still replace them.
fn load_config_file(path: &Path) -> Result<PackConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PackConfig, overrides: &CliOverrides) {
    if let Some(mode) = overrides.mode {
        config.pack.mode = mode;
    }
    if let Some(ref out) = overrides.out {
        config.output.dir = out.clone();
    }
    if let Some(ref extension) = overrides.extension {
        config.pack.extension = extension.clone();
    }
    if let Some(ref manifest) = overrides.manifest {
        config.output.manifest = manifest.clone();
    }
    if let Some(ref atlas_name) = overrides.atlas_name {
        config.output.atlas_name = atlas_name.clone();
    }
    if let Some(strict) = overrides.strict {
        config.pack.strict = strict;
    }
    if let Some(include_hidden) = overrides.include_hidden {
        config.pack.include_hidden = include_hidden;
    }
    if let Some(pretty) = overrides.pretty {
        config.output.pretty = pretty;
    }
}

/// Resolve a path relative to the assets root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the root.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

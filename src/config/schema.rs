//! Configuration schema types for `atlaspack.toml`
//!
//! Defines the structure and validation rules for packing configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How sprite folders are combined into atlases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PackMode {
    /// One atlas spanning all folders, one row per folder
    #[default]
    Batch,
    /// One atlas per folder
    Folders,
}

/// Sprite discovery and packing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackSection {
    /// Packing mode when no subcommand is given
    #[serde(default)]
    pub mode: PackMode,
    /// File name suffix identifying sprites
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Treat dot-directories as sprite folders
    #[serde(default)]
    pub include_hidden: bool,
    /// Abort the whole run on an undecodable sprite
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for PackSection {
    fn default() -> Self {
        Self {
            mode: PackMode::default(),
            extension: default_extension(),
            include_hidden: false,
            strict: true,
        }
    }
}

fn default_extension() -> String {
    ".png".to_string()
}

fn default_true() -> bool {
    true
}

/// Where and how results are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the assets root
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// Manifest file name
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Batch atlas file name
    #[serde(default = "default_atlas_name")]
    pub atlas_name: String,
    /// Indent the JSON manifest
    #[serde(default)]
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            manifest: default_manifest(),
            atlas_name: default_atlas_name(),
            pretty: false,
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_manifest() -> String {
    "data.json".to_string()
}

fn default_atlas_name() -> String {
    "atlas.png".to_string()
}

/// Complete atlaspack.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackConfig {
    #[serde(default)]
    pub pack: PackSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.manifest")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "atlaspack.toml: '{}' {}", self.field, self.message)
    }
}

/// A bare file name: non-empty, no path separators.
fn is_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && name != "." && name != ".."
}

impl PackConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.pack.extension.is_empty() {
            errors.push(ConfigValidationError {
                field: "pack.extension".to_string(),
                message: "must be a non-empty suffix such as \".png\"".to_string(),
            });
        }

        if !is_file_name(&self.output.manifest) {
            errors.push(ConfigValidationError {
                field: "output.manifest".to_string(),
                message: "must be a file name".to_string(),
            });
        }

        if !is_file_name(&self.output.atlas_name) {
            errors.push(ConfigValidationError {
                field: "output.atlas_name".to_string(),
                message: "must be a file name".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

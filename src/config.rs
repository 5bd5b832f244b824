use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RxCheckError};
use crate::types::OutputFormat;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the application directory under the platform config dir.
pub const APP_DIR: &str = "rxcheck";

/// Current configuration schema version.
pub const CONFIG_VERSION: u32 = 1;

/// Runtime configuration.
///
/// Every field has a default, so a partial file loads with the rest filled
/// in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RxCheckConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Knowledge file to load instead of the built-in tables.
    pub knowledge_path: Option<String>,
    /// Reject drugs whose category resolves to `unknown`.
    pub strict_classification: bool,
    /// Default output format for CLI results.
    pub output_format: OutputFormat,
    /// Responses from the tool server are truncated past this many characters.
    pub max_response_chars: usize,
}

impl Default for RxCheckConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            knowledge_path: None,
            strict_classification: false,
            output_format: OutputFormat::Markdown,
            max_response_chars: 15_000,
        }
    }
}

/// Default config file location: `<config dir>/rxcheck/config.json`.
///
/// Returns `None` on platforms without a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Loads the configuration from `path`.
///
/// A missing file is not an error: the defaults are returned.
pub fn load_config(path: &Path) -> Result<RxCheckConfig> {
    if !path.exists() {
        return Ok(RxCheckConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| RxCheckError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: RxCheckConfig =
        serde_json::from_str(&contents).map_err(|e| RxCheckError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;

    if config.max_response_chars == 0 {
        return Err(RxCheckError::Config {
            message: "max_response_chars must be greater than zero".to_string(),
        });
    }

    Ok(config)
}

/// Saves the configuration to `path` using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final location.
pub fn save_config(path: &Path, config: &RxCheckConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RxCheckError::Config {
            message: format!(
                "failed to create config directory '{}': {}",
                parent.display(),
                e
            ),
        })?;
    }

    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| RxCheckError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| RxCheckError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| RxCheckError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}

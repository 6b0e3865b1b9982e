//! Configuration file discovery and loading

use super::ShadyCssConfig;
use crate::Result;
use crate::error::ShadyCssError;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names, in lookup priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".shadycssrc.json",
    ".shadycssrc.toml",
    "shady-css.yaml",
    "shady-css.yml",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by walking upward from `start_path`
    ///
    /// Each directory is checked for the names in [`CONFIG_FILE_NAMES`] until
    /// one is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| ShadyCssError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// The format is chosen by extension: `.json`, `.toml`, `.yaml`/`.yml`.
    pub fn load_from_file(path: &Path) -> Result<ShadyCssConfig> {
        let content =
            fs::read_to_string(path).map_err(|e| ShadyCssError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let config: ShadyCssConfig = match ext {
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_failure(path, e))?,
            Some("toml") => toml::from_str(&content).map_err(|e| parse_failure(path, e))?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_failure(path, e))?
            }
            _ => {
                return Err(ShadyCssError::config_error(format!(
                    "Unsupported config file '{}' (expected .json, .toml, .yaml or .yml)",
                    path.display()
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path, or auto-discover from `start_dir`
    ///
    /// Falls back to the default configuration when nothing is found.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<ShadyCssConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ShadyCssError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(ShadyCssConfig::default())
            }
        }
    }
}

fn parse_failure(path: &Path, err: impl std::fmt::Display) -> ShadyCssError {
    ShadyCssError::config_error(format!(
        "Failed to load config from '{}': {}",
        path.display(),
        err
    ))
}

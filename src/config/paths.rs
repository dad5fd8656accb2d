//! Path management for finboard
//!
//! ## Path Resolution Order
//!
//! 1. `FINBOARD_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finboard` or `~/.config/finboard`
//! 3. Windows: `%APPDATA%\finboard`

use std::path::{Path, PathBuf};

use crate::error::FinboardError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FINBOARD_DATA_DIR";

/// Locations of finboard's own files
#[derive(Debug, Clone)]
pub struct FinboardPaths {
    base_dir: PathBuf,
}

impl FinboardPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application-data directory can be
    /// determined.
    pub fn new() -> Result<Self, FinboardError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };
        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--config-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to `config.json`
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Conventional location for a user dataset
    pub fn default_dataset_file(&self) -> PathBuf {
        self.base_dir.join("dataset.json")
    }

    pub fn ensure_directories(&self) -> Result<(), FinboardError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FinboardError::Io(format!(
                "Failed to create {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinboardError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                FinboardError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("finboard"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinboardError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinboardError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finboard"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.default_dataset_file(),
            temp_dir.path().join("dataset.json")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        env::set_var(DATA_DIR_ENV, temp_dir.path());

        let paths = FinboardPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("finboard");
        let paths = FinboardPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.is_dir());
    }
}

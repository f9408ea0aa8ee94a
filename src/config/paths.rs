//! Path management for homebox
//!
//! ## Path Resolution Order
//!
//! 1. `HOMEBOX_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/homebox` on Linux,
//!    `~/Library/Application Support/homebox` on macOS, `%APPDATA%\homebox` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::HomeboxError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "HOMEBOX_DATA_DIR";

/// Manages all paths used by homebox
#[derive(Debug, Clone)]
pub struct HomeboxPaths {
    /// Base directory for all homebox data
    base_dir: PathBuf,
}

impl HomeboxPaths {
    /// Create a new HomeboxPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, HomeboxError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create HomeboxPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the SQLite ledger store
    pub fn ledger_db(&self) -> PathBuf {
        self.data_dir().join("ledger.db")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), HomeboxError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HomeboxError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HomeboxError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if homebox has been initialized (ledger store exists)
    pub fn is_initialized(&self) -> bool {
        self.ledger_db().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, HomeboxError> {
    ProjectDirs::from("", "", "homebox")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| HomeboxError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HomeboxPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.ledger_db(),
            temp_dir.path().join("data").join("ledger.db")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HomeboxPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_settings_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HomeboxPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}

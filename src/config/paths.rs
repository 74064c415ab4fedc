//! Path management for eLoan
//!
//! Resolves where configuration and data files live.
//!
//! ## Path Resolution Order
//!
//! 1. `ELOAN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/eloan` or `~/.config/eloan`
//! 3. Windows: `%APPDATA%\eloan`

use std::path::PathBuf;

use crate::error::LoanError;

/// Manages all paths used by eLoan
#[derive(Debug, Clone)]
pub struct EloanPaths {
    /// Base directory for all eLoan data
    base_dir: PathBuf,
}

impl EloanPaths {
    /// Create a new EloanPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, LoanError> {
        let base_dir = if let Ok(custom) = std::env::var("ELOAN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create EloanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to loans.json (the product catalog)
    pub fn loans_file(&self) -> PathBuf {
        self.data_dir().join("loans.json")
    }

    /// Get the path to applications.json
    pub fn applications_file(&self) -> PathBuf {
        self.data_dir().join("applications.json")
    }

    /// Get the path to tickets.json (tickets and their replies)
    pub fn tickets_file(&self) -> PathBuf {
        self.data_dir().join("tickets.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LoanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LoanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LoanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, LoanError> {
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| LoanError::Config("Could not determine home directory".into()))
        })?;
    Ok(config_base.join("eloan"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, LoanError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LoanError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("eloan"))
}

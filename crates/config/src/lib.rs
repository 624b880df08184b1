//! Postbus config directory
//!
//! All Postbus settings live as JSON files in one directory, by default
//! `~/.config/postbus/`. Setting `POSTBUS_CONFIG_DIR` moves it elsewhere.
//!
//! Call [`init`] at application startup to bootstrap the directory.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Name of the directory under the platform config dir
const APP_DIR: &str = "postbus";

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "POSTBUS_CONFIG_DIR";

/// A directory of JSON config files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// Config directory rooted at `root`
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The Postbus config directory, `None` if the platform has no config dir
    pub fn locate() -> Option<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(Self::at(dir));
        }
        dirs::config_dir().map(|p| Self::at(p.join(APP_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file within the directory
    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.path(filename).exists()
    }

    /// Create the directory if it doesn't exist
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create config directory: {}", self.root.display()))
    }

    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        load_json_file(&self.path(filename))
    }

    /// Write a file, creating the directory first
    pub fn save<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        self.ensure()?;
        save_json_file(&self.path(filename), value)
    }
}

/// Initialize the Postbus config directory.
///
/// Creates it if it doesn't exist. Call this once at application startup.
pub fn init() -> Result<ConfigDir> {
    let dir = ConfigDir::locate().context("Could not determine config directory")?;
    dir.ensure()?;
    Ok(dir)
}

/// Path of a file in the Postbus config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    ConfigDir::locate().map(|dir| dir.path(filename))
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Save a value as pretty-printed JSON to an arbitrary path
pub fn save_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

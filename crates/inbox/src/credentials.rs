//! Credential storage
//!
//! The backend expects the raw access token in the `Authorization` header.
//! Tokens are looked up by key; there is no refresh or expiry handling.

use anyhow::{Context, Result};
use log::warn;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Key the access token is stored under
pub const ACCESS_TOKEN_KEY: &str = "access-token";

/// Tokens filename in the Postbus config directory
const TOKENS_FILE: &str = "tokens.json";

/// Key-value credential source
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Shorthand for the access token
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }
}

/// Token store backed by a flat JSON object on disk
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (~/.config/postbus/tokens.json)
    pub fn open_default() -> Result<Self> {
        let path = config::config_path(TOKENS_FILE).context("Could not determine config directory")?;
        Ok(Self::new(path))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        config::load_json_file(&self.path)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut tokens) => tokens.remove(key),
            Err(e) => {
                warn!("Failed to read token store {}: {:#}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut tokens = self.load()?;
        tokens.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        config::save_json_file(&self.path, &tokens)
    }
}

/// In-memory token store
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with an access token
    pub fn with_access_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut tokens) = store.tokens.write() {
            tokens.insert(ACCESS_TOKEN_KEY.to_string(), token.into());
        }
        store
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.tokens.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| anyhow::anyhow!("token store lock poisoned"))?;
        tokens.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_access_token() {
        let store = InMemoryTokenStore::with_access_token("secret");
        assert_eq!(store.access_token().as_deref(), Some("secret"));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens.json");

        FileTokenStore::new(&path).set(ACCESS_TOKEN_KEY, "abc").unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.access_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_store_corrupt_file_reads_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.access_token(), None);
        assert!(store.set(ACCESS_TOKEN_KEY, "x").is_err());
    }
}

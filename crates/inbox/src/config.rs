//! Configuration loading for the inbox client
//!
//! Loads the backend location and endpoint layout from (in order of priority):
//! 1. An explicit JSON file
//! 2. The Postbus config directory (~/.config/postbus/inbox.json)
//! 3. Runtime environment variables
//! 4. Built-in defaults

use anyhow::{Context, Result};
use config::ConfigDir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::models::Folder;

/// Config filename in the Postbus config directory
const CONFIG_FILE: &str = "inbox.json";

/// Environment variable overriding the backend base URL
const BASE_URL_ENV: &str = "POSTBUS_BASE_URL";

/// Backend location and endpoint layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxConfig {
    /// Origin all endpoint paths are resolved against
    pub base_url: String,
    /// Listing endpoint for received messages
    pub inbox_endpoint: String,
    /// Listing endpoint for sent messages
    pub outbox_endpoint: String,
    /// Mark-as-read endpoint, the message id is appended
    pub mark_read_endpoint: String,
    /// Mark-as-unread endpoint, the message id is appended
    pub mark_unread_endpoint: String,
    /// Archive variant used while the inbox is shown
    pub archive_receiver_endpoint: String,
    /// Archive variant used while the outbox is shown
    pub archive_sender_endpoint: String,
    /// Path of the message-detail page
    pub detail_page: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Re-fetch the active folder on sort toggle instead of the inbox
    pub refetch_active_folder_on_sort: bool,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            inbox_endpoint: "/api/messages/receiver_get".to_string(),
            outbox_endpoint: "/api/messages/sender_get".to_string(),
            mark_read_endpoint: "/api/messages/markAsRead/".to_string(),
            mark_unread_endpoint: "/api/messages/markAsUnread/".to_string(),
            archive_receiver_endpoint: "/api/messages/archiveReceiver/".to_string(),
            archive_sender_endpoint: "/api/messages/archiveSender/".to_string(),
            detail_page: "/messageDetails/messageDetails.html".to_string(),
            timeout_secs: 30,
            refetch_active_folder_on_sort: false,
        }
    }
}

impl InboxConfig {
    /// Load configuration using the following priority:
    /// 1. JSON file (~/.config/postbus/inbox.json)
    /// 2. Runtime environment variables
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        match ConfigDir::locate() {
            Some(dir) => Self::load_from(&dir),
            None => Self::from_env().validated(),
        }
    }

    /// Load `inbox.json` from `dir`, falling back to the environment
    pub fn load_from(dir: &ConfigDir) -> Result<Self> {
        let config = if dir.contains(CONFIG_FILE) {
            dir.load(CONFIG_FILE)?
        } else {
            Self::from_env()
        };
        config.validated()
    }

    /// Load configuration from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config: Self = config::load_json_file(path)?;
        config.validated()
    }

    /// Defaults, with the base URL taken from the environment when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config
    }

    /// Get the default config file path (~/.config/postbus/inbox.json)
    pub fn default_config_path() -> Option<PathBuf> {
        config::config_path(CONFIG_FILE)
    }

    fn validated(self) -> Result<Self> {
        self.base()?;
        Ok(self)
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("Invalid base_url: {}", self.base_url))
    }

    /// Listing endpoint for a folder
    pub fn listing_endpoint(&self, folder: Folder) -> &str {
        match folder {
            Folder::Inbox => &self.inbox_endpoint,
            Folder::Outbox => &self.outbox_endpoint,
        }
    }

    /// Archive endpoint variant for a folder
    pub fn archive_endpoint(&self, folder: Folder) -> &str {
        match folder {
            Folder::Inbox => &self.archive_receiver_endpoint,
            Folder::Outbox => &self.archive_sender_endpoint,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

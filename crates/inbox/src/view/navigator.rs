//! Opening the message-detail view

use anyhow::{Context, Result};
use log::info;

/// Opens a URL in a new browsing context
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Navigator handing URLs to the system browser
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &str) -> Result<()> {
        info!("Opening {}", url);
        open::that(url).with_context(|| format!("Failed to open browser for {}", url))
    }
}

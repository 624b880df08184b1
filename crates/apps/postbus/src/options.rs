//! Command-line options

use anyhow::{Context, Result, bail};
use inbox::InboxConfig;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: postbus [--demo] [--config <path>]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Run against the in-memory demo backend
    pub demo: bool,
    /// Explicit inbox config file, takes priority over the config directory
    pub config_path: Option<PathBuf>,
}

impl Options {
    /// Parse the arguments following the program name
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--demo" => options.demo = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    options.config_path = Some(PathBuf::from(path));
                }
                other => match other.strip_prefix("--config=") {
                    Some(path) if !path.is_empty() => options.config_path = Some(PathBuf::from(path)),
                    _ => bail!("Unknown argument: {}", other),
                },
            }
        }
        Ok(options)
    }

    /// Load the inbox configuration
    ///
    /// An explicit `--config` file wins over `~/.config/postbus/inbox.json`
    /// and the environment.
    pub fn load_config(&self) -> Result<InboxConfig> {
        match &self.config_path {
            Some(path) => InboxConfig::from_file(path),
            None => InboxConfig::load(),
        }
    }
}

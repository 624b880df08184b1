//! Command definitions for the terminal front-end

use anyhow::{Result, bail};
use inbox::{Folder, MessageId};

/// A command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch folder and fetch it
    ShowFolder(Folder),
    /// Print the rendered list
    List,
    /// Re-fetch the active folder
    Refresh,
    /// Check or uncheck a message's checkbox
    Check(MessageId, bool),
    /// Click a message's link
    Open(MessageId),
    /// Toggle read/unread on the selection
    ToggleRead,
    /// Archive the selection
    Delete,
    /// Flip the date order
    Sort,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let command = match (name.to_ascii_lowercase().as_str(), argument) {
        ("inbox" | "i", None) => Command::ShowFolder(Folder::Inbox),
        ("outbox" | "o", None) => Command::ShowFolder(Folder::Outbox),
        ("list" | "ls", None) => Command::List,
        ("refresh" | "r", None) => Command::Refresh,
        ("check" | "x", Some(id)) => Command::Check(MessageId::new(id), true),
        ("uncheck", Some(id)) => Command::Check(MessageId::new(id), false),
        ("open", Some(id)) => Command::Open(MessageId::new(id)),
        ("toggle" | "u", None) => Command::ToggleRead,
        ("delete" | "d", None) => Command::Delete,
        ("sort" | "s", None) => Command::Sort,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        ("check" | "x" | "uncheck" | "open", None) => bail!("'{}' needs a message id", name),
        (_, Some(_)) if is_known(name) => bail!("'{}' takes no argument", name),
        _ => bail!("Unknown command '{}', type 'help' for a list", name),
    };

    if words.next().is_some() {
        bail!("Too many arguments for '{}'", name);
    }
    Ok(Some(command))
}

fn is_known(name: &str) -> bool {
    super::keymap::commands_help()
        .iter()
        .flat_map(|category| category.commands.iter())
        .any(|c| c.names.split(" | ").any(|n| n.eq_ignore_ascii_case(name)))
}

//! Postbus application - dispatches prompt commands to the inbox controller

use inbox::{BulkAction, BulkStatus, Folder, InboxController};
use log::{error, info};
use std::io::{self, Write};

use crate::input::{Command, help_text};
use crate::views::message_list;

/// Whether the prompt loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main application state
pub struct PostbusApp {
    controller: InboxController,
}

impl PostbusApp {
    pub fn new(controller: InboxController) -> Self {
        Self { controller }
    }

    /// Initial load: the page opens on the inbox
    pub fn start(&mut self, out: &mut dyn Write) -> io::Result<()> {
        info!("Loading inbox");
        self.show_folder(Folder::Inbox, out)
    }

    /// Run one command
    pub fn execute(&mut self, command: Command, out: &mut dyn Write) -> io::Result<Flow> {
        match command {
            Command::ShowFolder(folder) => self.show_folder(folder, out)?,
            Command::List => self.print_list(out)?,
            Command::Refresh => {
                if let Err(e) = self.controller.refresh() {
                    writeln!(out, "Could not load messages: {}", e)?;
                }
                self.print_list(out)?;
            }
            Command::Check(id, checked) => {
                if !self.controller.set_checked(&id, checked) {
                    writeln!(out, "No message #{} in the list", id)?;
                }
            }
            Command::Open(id) => {
                if let Err(e) = self.controller.open_message(&id) {
                    error!("Failed to open message {}: {:#}", id, e);
                    writeln!(out, "Could not open message #{}: {}", id, e)?;
                }
            }
            Command::ToggleRead => {
                let status = self.controller.toggle_read();
                self.report(&status, out)?;
            }
            Command::Delete => {
                let status = self.controller.delete_selected();
                self.report(&status, out)?;
            }
            Command::Sort => {
                if let Err(e) = self.controller.toggle_sort() {
                    writeln!(out, "Could not load messages: {}", e)?;
                }
                self.print_list(out)?;
            }
            Command::Help => write!(out, "{}", help_text())?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show_folder(&mut self, folder: Folder, out: &mut dyn Write) -> io::Result<()> {
        if let Err(e) = self.controller.select_folder(folder) {
            writeln!(out, "Could not load messages: {}", e)?;
        }
        self.print_list(out)
    }

    fn print_list(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(
            out,
            "{}",
            message_list::render(
                self.controller.list(),
                self.controller.folder(),
                self.controller.sort_order()
            )
        )
    }

    fn report(&self, status: &BulkStatus, out: &mut dyn Write) -> io::Result<()> {
        let outcome = match status {
            // The dialog already told the user
            BulkStatus::NothingSelected => return Ok(()),
            BulkStatus::Cancelled => return writeln!(out, "Cancelled"),
            BulkStatus::Completed(outcome) => outcome,
        };

        let verb = match outcome.action {
            BulkAction::MarkRead => "Marked as read",
            BulkAction::MarkUnread => "Marked as unread",
            BulkAction::Archive => "Archived",
        };
        writeln!(out, "{}: {} of {}", verb, outcome.succeeded.len(), outcome.total())?;
        for (id, e) in &outcome.failed {
            writeln!(out, "  #{} failed: {}", id, e)?;
        }
        self.print_list(out)
    }
}

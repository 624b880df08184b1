//! User-facing dialogs: blocking alerts and confirmations

use crate::actions::BulkAction;

/// Fixed Dutch prompt strings
pub mod prompts {
    pub const NO_SELECTION: &str = "Geen bericht geselecteerd";
    pub const CONFIRM_TITLE: &str = "Weet je het zeker?";
    pub const CONFIRM_BUTTON: &str = "Ja, doe het!";
    pub const CANCEL_BUTTON: &str = "Nee, annuleren";
    pub const MARK_READ: &str = "markeren als gelezen";
    pub const MARK_UNREAD: &str = "markeren als ongelezen";
    pub const ARCHIVE: &str = "verwijderen";
}

/// Icon shown next to a dialog's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogIcon {
    Warning,
}

/// A two-button confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub text: String,
    pub icon: DialogIcon,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmRequest {
    /// Count-aware confirmation for a bulk action
    pub fn for_action(action: BulkAction, count: usize) -> Self {
        Self {
            title: prompts::CONFIRM_TITLE.to_string(),
            text: format!(
                "Weet je zeker dat je {} bericht(en) wilt {}?",
                count,
                action.label()
            ),
            icon: DialogIcon::Warning,
            confirm_label: prompts::CONFIRM_BUTTON.to_string(),
            cancel_label: prompts::CANCEL_BUTTON.to_string(),
        }
    }
}

/// Which button the user chose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Cancelled,
}

impl ConfirmOutcome {
    pub fn is_confirmed(self) -> bool {
        self == ConfirmOutcome::Confirmed
    }
}

/// Dialog provider
pub trait Dialogs: Send + Sync {
    /// Show a message and block until dismissed
    fn alert(&self, text: &str);

    /// Ask the user to confirm or cancel
    fn confirm(&self, request: &ConfirmRequest) -> ConfirmOutcome;
}

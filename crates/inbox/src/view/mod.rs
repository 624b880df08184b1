//! View state owned by the inbox controller
//!
//! Replaces the browser DOM: the rendered list, the dialog provider and the
//! navigator that opens detail pages.

mod dialog;
mod list;
mod navigator;

pub use dialog::{ConfirmOutcome, ConfirmRequest, DialogIcon, Dialogs, prompts};
pub use list::{
    ITEM_CLASS, ListItem, MessageList, READ_CLASS, UNREAD_CLASS, detail_link, format_date_label,
    sort_messages,
};
pub use navigator::{BrowserNavigator, Navigator};

//! Inbox actions
//!
//! The controller reacting to user actions (open, toggle read, delete,
//! sort, folder switch) and the bulk fan-out it uses.

mod bulk;
mod controller;

pub use bulk::{BulkAction, BulkOutcome, BulkStatus};
pub use controller::InboxController;

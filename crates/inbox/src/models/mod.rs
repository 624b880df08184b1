//! Domain models for inbox entities

mod folder;
mod message;

pub use folder::{Folder, SortOrder};
pub use message::{Message, MessageId, timestamp};

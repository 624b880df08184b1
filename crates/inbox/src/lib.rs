//! Inbox crate - Business logic for the message inbox page
//!
//! This crate provides the UI-independent part of the inbox:
//! - Domain models (Message, Folder, SortOrder)
//! - Message service client for the REST backend, plus an in-memory backend
//! - Token storage for the access token
//! - The rendered list as plain view state
//! - The inbox controller handling open, toggle read/unread, delete and sort
//!
//! Front-ends supply the dialog provider and the navigator.

pub mod actions;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod service;
pub mod view;

pub use actions::{BulkAction, BulkOutcome, BulkStatus, InboxController};
pub use config::InboxConfig;
pub use credentials::{ACCESS_TOKEN_KEY, FileTokenStore, InMemoryTokenStore, TokenStore};
pub use error::{ServiceError, ServiceResult};
pub use models::{Folder, Message, MessageId, SortOrder};
pub use service::{HttpMessageService, InMemoryMessageService, MessageService, ServiceCall};
pub use view::{
    BrowserNavigator, ConfirmOutcome, ConfirmRequest, DialogIcon, Dialogs, ListItem, MessageList,
    Navigator,
};

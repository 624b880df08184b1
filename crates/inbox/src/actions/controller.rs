//! Inbox controller
//!
//! Owns the view state (active folder, sort order, rendered list) and
//! coordinates between the message service and the user for every action.
//! Actions are performed in two steps:
//! 1. Call the message service to update server state
//! 2. Update the rendered list for each request that succeeded
//!
//! The server is the source of truth; a failed request leaves its item as it was.

use anyhow::{Context, Result, bail};
use chrono::Local;
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::bulk::{BulkAction, BulkOutcome, BulkStatus, fan_out};
use crate::config::InboxConfig;
use crate::credentials::TokenStore;
use crate::error::ServiceResult;
use crate::models::{Folder, Message, MessageId, SortOrder};
use crate::service::MessageService;
use crate::view::{ConfirmRequest, Dialogs, ListItem, MessageList, Navigator, prompts, sort_messages};

/// Controller for the message list of one inbox page
pub struct InboxController {
    service: Arc<dyn MessageService>,
    tokens: Arc<dyn TokenStore>,
    dialogs: Arc<dyn Dialogs>,
    navigator: Arc<dyn Navigator>,
    config: InboxConfig,
    folder: Folder,
    sort_order: SortOrder,
    list: MessageList,
}

impl InboxController {
    /// Create a controller showing the inbox, newest first, with an empty list
    pub fn new(
        config: InboxConfig,
        service: Arc<dyn MessageService>,
        tokens: Arc<dyn TokenStore>,
        dialogs: Arc<dyn Dialogs>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            service,
            tokens,
            dialogs,
            navigator,
            config,
            folder: Folder::default(),
            sort_order: SortOrder::default(),
            list: MessageList::new(),
        }
    }

    pub fn folder(&self) -> Folder {
        self.folder
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn list(&self) -> &MessageList {
        &self.list
    }

    pub fn config(&self) -> &InboxConfig {
        &self.config
    }

    /// Fetch the listing behind `endpoint` and render it
    ///
    /// On any failure the error is logged and the list is left untouched.
    /// Returns the number of rendered items.
    pub fn fetch_messages(&mut self, endpoint: &str) -> ServiceResult<usize> {
        let token = self.tokens.access_token();

        match self.service.fetch_messages(endpoint, token.as_deref()) {
            Ok(messages) => {
                debug!("Fetched {} messages from {}", messages.len(), endpoint);
                self.render(messages);
                Ok(self.list.len())
            }
            Err(e) => {
                error!("Error fetching messages from {}: {}", endpoint, e);
                Err(e)
            }
        }
    }

    /// Sort a batch by the current order and replace the list with it
    pub fn render(&mut self, mut messages: Vec<Message>) {
        sort_messages(&mut messages, self.sort_order);

        let items = messages
            .iter()
            .map(|m| ListItem::new(m, self.folder, &self.config.detail_page, &Local))
            .collect();
        self.list.replace(items);
    }

    /// Re-fetch the active folder
    pub fn refresh(&mut self) -> ServiceResult<usize> {
        let endpoint = self.config.listing_endpoint(self.folder).to_string();
        self.fetch_messages(&endpoint)
    }

    /// Switch to `folder` and fetch its listing
    pub fn select_folder(&mut self, folder: Folder) -> ServiceResult<usize> {
        info!("Showing {}", folder);
        self.folder = folder;
        self.refresh()
    }

    /// Flip the date order and re-fetch
    ///
    /// Re-fetches the inbox listing regardless of the active folder unless
    /// `refetch_active_folder_on_sort` is set.
    pub fn toggle_sort(&mut self) -> ServiceResult<usize> {
        self.sort_order = self.sort_order.toggled();
        debug!("Sort order is now {:?}", self.sort_order);

        let folder = if self.config.refetch_active_folder_on_sort {
            self.folder
        } else {
            Folder::Inbox
        };
        let endpoint = self.config.listing_endpoint(folder).to_string();
        self.fetch_messages(&endpoint)
    }

    /// Checkbox change handler, `false` if no item has this id
    pub fn set_checked(&mut self, id: &MessageId, checked: bool) -> bool {
        self.list.set_checked(id, checked)
    }

    /// Ids of the checked items, recomputed from the list
    pub fn selected_ids(&self) -> Vec<MessageId> {
        self.list.selected_ids()
    }

    /// Link click: mark the message as read, then open its detail page
    ///
    /// A failed mark is logged and does not block navigation.
    pub fn open_message(&mut self, id: &MessageId) -> Result<()> {
        let Some(index) = self.list.position(id) else {
            bail!("Message {} is not in the list", id);
        };
        let link = self.list.items()[index].detail_link.clone();

        let token = self.tokens.access_token();
        match self.service.mark_as_read(id, token.as_deref()) {
            Ok(()) => self.apply_read_state(index, id, true),
            Err(e) => error!("Error marking message {} as read: {}", id, e),
        }

        let base = self.config.base()?;
        let url = base
            .join(&link)
            .with_context(|| format!("Invalid detail link: {}", link))?;
        self.navigator.open(url.as_str())
    }

    /// Mark all selected messages read, or all unread
    ///
    /// If any selected message is unread every selected message is marked
    /// read; otherwise every selected message is marked unread.
    pub fn toggle_read(&mut self) -> BulkStatus {
        let indices = self.list.selected_indices();
        if indices.is_empty() {
            return self.nothing_selected();
        }

        let selected: Vec<MessageId> = indices
            .iter()
            .map(|&i| self.list.items()[i].message_id.clone())
            .collect();
        let mark_read = indices.iter().any(|&i| !self.list.items()[i].is_read());
        let action = if mark_read {
            BulkAction::MarkRead
        } else {
            BulkAction::MarkUnread
        };

        if !self.confirm(action, selected.len()) {
            return BulkStatus::Cancelled;
        }

        let token = self.tokens.access_token();
        let service = self.service.as_ref();
        let results = fan_out(&selected, |id| {
            if mark_read {
                service.mark_as_read(id, token.as_deref())
            } else {
                service.mark_as_unread(id, token.as_deref())
            }
        });

        let mut outcome = BulkOutcome::new(action);
        for ((index, id), result) in indices.into_iter().zip(selected).zip(results) {
            match result {
                Ok(()) => {
                    self.apply_read_state(index, &id, mark_read);
                    outcome.succeeded.push(id);
                }
                Err(e) => {
                    error!(
                        "Error marking message {} as {}: {}",
                        id,
                        if mark_read { "read" } else { "unread" },
                        e
                    );
                    outcome.failed.push((id, e));
                }
            }
        }

        info!(
            "{:?}: {} succeeded, {} failed",
            action,
            outcome.succeeded.len(),
            outcome.failed.len()
        );
        BulkStatus::Completed(outcome)
    }

    /// Archive all selected messages through the active folder's endpoint
    pub fn delete_selected(&mut self) -> BulkStatus {
        let selected = self.list.selected_ids();
        if selected.is_empty() {
            return self.nothing_selected();
        }

        if !self.confirm(BulkAction::Archive, selected.len()) {
            return BulkStatus::Cancelled;
        }

        let token = self.tokens.access_token();
        let endpoint = self.config.archive_endpoint(self.folder).to_string();
        let service = self.service.as_ref();
        let results = fan_out(&selected, |id| service.archive(&endpoint, id, token.as_deref()));

        let mut outcome = BulkOutcome::new(BulkAction::Archive);
        for (id, result) in selected.into_iter().zip(results) {
            match result {
                Ok(()) => {
                    if !self.list.remove(&id) {
                        debug!("Archived message {} was already removed", id);
                    }
                    outcome.succeeded.push(id);
                }
                Err(e) => {
                    error!("Error archiving message with ID {}: {}", id, e);
                    outcome.failed.push((id, e));
                }
            }
        }

        info!(
            "Archived {} messages via {}, {} failed",
            outcome.succeeded.len(),
            endpoint,
            outcome.failed.len()
        );
        BulkStatus::Completed(outcome)
    }

    fn nothing_selected(&self) -> BulkStatus {
        warn!("No message selected");
        self.dialogs.alert(prompts::NO_SELECTION);
        BulkStatus::NothingSelected
    }

    fn confirm(&self, action: BulkAction, count: usize) -> bool {
        let request = ConfirmRequest::for_action(action, count);
        let confirmed = self.dialogs.confirm(&request).is_confirmed();
        if !confirmed {
            info!("User canceled the action");
        }
        confirmed
    }

    /// Swap the read/unread class of the item at `index`
    ///
    /// The item is only touched if it still shows `id`.
    fn apply_read_state(&mut self, index: usize, id: &MessageId, read: bool) {
        match self.list.item_at_mut(index) {
            Some(item) if &item.message_id == id => item.set_read(read),
            _ => debug!("Message {} is no longer rendered", id),
        }
    }
}

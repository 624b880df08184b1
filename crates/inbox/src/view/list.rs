//! Message list view model
//!
//! The rendered list is plain data: one [`ListItem`] per message of the last
//! fetched batch, carrying the checkbox state, the detail link, the subject,
//! the date label and the read/unread class pair.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::models::{Folder, Message, MessageId, SortOrder};

/// Class carried by every list item
pub const ITEM_CLASS: &str = "messageItem";
/// Class of an item whose message has been read
pub const READ_CLASS: &str = "read";
/// Class of an item whose message has not been read
pub const UNREAD_CLASS: &str = "unread";

/// Day-first, 24-hour date label (`01/02/2024, 10:00:00`)
const DATE_LABEL_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A single rendered message row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Checkbox value
    pub message_id: MessageId,
    /// Checkbox state
    pub checked: bool,
    /// Subject heading
    pub subject: String,
    /// Formatted send time
    pub date_label: String,
    /// Relative link to the detail page, opened in a new browsing context
    pub detail_link: String,
    read: bool,
}

impl ListItem {
    /// Build the row for `message` shown in `folder`
    pub fn new<Tz>(message: &Message, folder: Folder, detail_page: &str, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            message_id: message.message_id.clone(),
            checked: false,
            subject: message.subject.clone(),
            date_label: format_date_label(&message.date_time, tz),
            detail_link: detail_link(detail_page, &message.message_id, folder),
            read: message.read,
        }
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// The item's class set, `read` and `unread` are mutually exclusive
    pub fn classes(&self) -> [&'static str; 2] {
        [ITEM_CLASS, if self.read { READ_CLASS } else { UNREAD_CLASS }]
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    pub(crate) fn set_read(&mut self, read: bool) {
        self.read = read;
    }
}

/// Format a timestamp as a day-first, 24-hour label in `tz`
pub fn format_date_label<Tz>(date_time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date_time
        .with_timezone(tz)
        .format(DATE_LABEL_FORMAT)
        .to_string()
}

/// Detail-page link carrying the message id and folder origin
pub fn detail_link(detail_page: &str, id: &MessageId, folder: Folder) -> String {
    format!(
        "{}?messageId={}&origin={}",
        detail_page,
        urlencoding::encode(id.as_str()),
        folder.origin()
    )
}

/// Sort a batch in place by send time
///
/// The sort is stable: equal timestamps keep their backend order.
pub fn sort_messages(messages: &mut [Message], order: SortOrder) {
    messages.sort_by(|a, b| match order {
        SortOrder::Descending => b.date_time.cmp(&a.date_time),
        SortOrder::Ascending => a.date_time.cmp(&b.date_time),
    });
}

/// The rendered message list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageList {
    items: Vec<ListItem>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire content of the list
    pub fn replace(&mut self, items: Vec<ListItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Message ids in display order
    pub fn ids(&self) -> Vec<MessageId> {
        self.items.iter().map(|i| i.message_id.clone()).collect()
    }

    /// First item whose checkbox value is `id`
    pub fn get(&self, id: &MessageId) -> Option<&ListItem> {
        self.items.iter().find(|i| &i.message_id == id)
    }

    pub(crate) fn position(&self, id: &MessageId) -> Option<usize> {
        self.items.iter().position(|i| &i.message_id == id)
    }

    pub(crate) fn item_at_mut(&mut self, index: usize) -> Option<&mut ListItem> {
        self.items.get_mut(index)
    }

    /// Update the checkbox of the first item with `id`
    ///
    /// Returns `false` when no such item is rendered.
    pub fn set_checked(&mut self, id: &MessageId, checked: bool) -> bool {
        match self.items.iter_mut().find(|i| &i.message_id == id) {
            Some(item) => {
                item.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Indices of checked items, in display order
    pub fn selected_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.checked)
            .map(|(index, _)| index)
            .collect()
    }

    /// Checkbox values of checked items, in display order
    pub fn selected_ids(&self) -> Vec<MessageId> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.message_id.clone())
            .collect()
    }

    /// Remove the first item whose checkbox value is `id`
    ///
    /// Returns `false` when the item is already gone.
    pub fn remove(&mut self, id: &MessageId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

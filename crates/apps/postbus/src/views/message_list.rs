//! Message list view - prints the rendered list as text rows

use inbox::{Folder, ListItem, MessageList, SortOrder};

/// Header line for the list
pub fn header(folder: Folder, order: SortOrder, count: usize) -> String {
    let title = match folder {
        Folder::Inbox => "Inbox",
        Folder::Outbox => "Outbox",
    };
    let order = if order.is_descending() {
        "newest first"
    } else {
        "oldest first"
    };
    format!("{} - {} messages ({})", title, count, order)
}

/// One row: checkbox, unread marker, date, id and subject
pub fn row(item: &ListItem) -> String {
    let checkbox = if item.checked { "[x]" } else { "[ ]" };
    let marker = if item.is_read() { ' ' } else { '*' };
    format!(
        "{} {} {}  #{:<6} {}",
        checkbox, marker, item.date_label, item.message_id, item.subject
    )
}

/// Full listing including header
pub fn render(list: &MessageList, folder: Folder, order: SortOrder) -> String {
    let mut out = header(folder, order, list.len());
    out.push('\n');

    if list.is_empty() {
        out.push_str("  (no messages)\n");
        return out;
    }
    for item in list.items() {
        out.push_str(&row(item));
        out.push('\n');
    }
    out
}

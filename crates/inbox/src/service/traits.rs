//! Message service trait definition

use crate::error::ServiceResult;
use crate::models::{Message, MessageId};

/// Trait for the message backend
///
/// Abstracts over the HTTP backend and the in-memory implementation.
/// Every call carries the caller's access token; `None` sends the request
/// unauthenticated and leaves rejection to the backend.
pub trait MessageService: Send + Sync {
    /// Fetch the listing behind `endpoint`
    fn fetch_messages(&self, endpoint: &str, token: Option<&str>) -> ServiceResult<Vec<Message>>;

    /// Mark a message as read
    fn mark_as_read(&self, id: &MessageId, token: Option<&str>) -> ServiceResult<()>;

    /// Mark a message as unread
    fn mark_as_unread(&self, id: &MessageId, token: Option<&str>) -> ServiceResult<()>;

    /// Archive a message through the given endpoint variant
    fn archive(&self, endpoint: &str, id: &MessageId, token: Option<&str>) -> ServiceResult<()>;
}

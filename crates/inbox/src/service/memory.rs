//! In-memory message service
//!
//! Holds listings keyed by endpoint and records every call. Used by the
//! demo mode of the app and throughout the tests; failures can be injected
//! per message id or for listings.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};

use super::MessageService;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Message, MessageId};

/// A call received by [`InMemoryMessageService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    Fetch { endpoint: String },
    MarkRead(MessageId),
    MarkUnread(MessageId),
    Archive { endpoint: String, id: MessageId },
}

/// In-memory implementation of MessageService
#[derive(Default)]
pub struct InMemoryMessageService {
    listings: RwLock<HashMap<String, Vec<Message>>>,
    failing_ids: RwLock<HashSet<MessageId>>,
    fetch_failure: RwLock<Option<ServiceError>>,
    calls: Mutex<Vec<ServiceCall>>,
    tokens: Mutex<Vec<Option<String>>>,
}

impl InMemoryMessageService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing served at `endpoint`
    pub fn set_listing(&self, endpoint: &str, messages: Vec<Message>) {
        if let Ok(mut listings) = self.listings.write() {
            listings.insert(endpoint.to_string(), messages);
        }
    }

    /// Current listing at `endpoint`
    pub fn listing(&self, endpoint: &str) -> Vec<Message> {
        self.listings
            .read()
            .ok()
            .and_then(|l| l.get(endpoint).cloned())
            .unwrap_or_default()
    }

    /// Make every mark/archive call for `id` fail with a 500
    pub fn fail_for(&self, id: impl Into<MessageId>) {
        if let Ok(mut failing) = self.failing_ids.write() {
            failing.insert(id.into());
        }
    }

    /// Make listing fetches fail with `error` (or succeed again with `None`)
    pub fn fail_fetches(&self, error: Option<ServiceError>) {
        if let Ok(mut failure) = self.fetch_failure.write() {
            *failure = error;
        }
    }

    /// All calls received so far, in arrival order
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Tokens presented with each call, in arrival order
    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.clear();
        }
    }

    fn record(&self, call: ServiceCall, token: Option<&str>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.push(token.map(str::to_string));
        }
    }

    fn check_failure(&self, id: &MessageId) -> ServiceResult<()> {
        let failing = self
            .failing_ids
            .read()
            .map(|f| f.contains(id))
            .unwrap_or(false);
        if failing {
            Err(ServiceError::Status(500))
        } else {
            Ok(())
        }
    }

    fn set_read(&self, id: &MessageId, read: bool) {
        if let Ok(mut listings) = self.listings.write() {
            listings
                .values_mut()
                .flat_map(|messages| messages.iter_mut())
                .filter(|m| &m.message_id == id)
                .for_each(|m| m.read = read);
        }
    }
}

impl MessageService for InMemoryMessageService {
    fn fetch_messages(&self, endpoint: &str, token: Option<&str>) -> ServiceResult<Vec<Message>> {
        self.record(
            ServiceCall::Fetch {
                endpoint: endpoint.to_string(),
            },
            token,
        );

        if let Some(err) = self.fetch_failure.read().ok().and_then(|f| f.clone()) {
            return Err(err);
        }
        Ok(self.listing(endpoint))
    }

    fn mark_as_read(&self, id: &MessageId, token: Option<&str>) -> ServiceResult<()> {
        self.record(ServiceCall::MarkRead(id.clone()), token);
        self.check_failure(id)?;
        self.set_read(id, true);
        Ok(())
    }

    fn mark_as_unread(&self, id: &MessageId, token: Option<&str>) -> ServiceResult<()> {
        self.record(ServiceCall::MarkUnread(id.clone()), token);
        self.check_failure(id)?;
        self.set_read(id, false);
        Ok(())
    }

    fn archive(&self, endpoint: &str, id: &MessageId, token: Option<&str>) -> ServiceResult<()> {
        self.record(
            ServiceCall::Archive {
                endpoint: endpoint.to_string(),
                id: id.clone(),
            },
            token,
        );
        self.check_failure(id)?;

        if let Ok(mut listings) = self.listings.write() {
            for messages in listings.values_mut() {
                messages.retain(|m| &m.message_id != id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn message(id: &str, read: bool) -> Message {
        Message::new(id, "Subject", Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(), read)
    }

    #[test]
    fn test_mark_updates_listing() {
        let service = InMemoryMessageService::new();
        service.set_listing("/inbox", vec![message("1", false)]);

        service.mark_as_read(&MessageId::new("1"), Some("t")).unwrap();
        assert!(service.listing("/inbox")[0].read);

        service.mark_as_unread(&MessageId::new("1"), Some("t")).unwrap();
        assert!(!service.listing("/inbox")[0].read);
        assert_eq!(service.tokens(), vec![Some("t".to_string()); 2]);
    }

    #[test]
    fn test_injected_failure_leaves_state() {
        let service = InMemoryMessageService::new();
        service.set_listing("/inbox", vec![message("1", false)]);
        service.fail_for("1");

        let err = service.mark_as_read(&MessageId::new("1"), None).unwrap_err();
        assert_eq!(err, ServiceError::Status(500));
        assert!(!service.listing("/inbox")[0].read);
        assert_eq!(service.calls(), vec![ServiceCall::MarkRead(MessageId::new("1"))]);
    }

    #[test]
    fn test_archive_removes_from_listing() {
        let service = InMemoryMessageService::new();
        service.set_listing("/inbox", vec![message("1", false), message("2", true)]);

        service
            .archive("/archiveReceiver/", &MessageId::new("1"), None)
            .unwrap();

        let ids: Vec<_> = service
            .listing("/inbox")
            .into_iter()
            .map(|m| m.message_id)
            .collect();
        assert_eq!(ids, vec![MessageId::new("2")]);
    }

    #[test]
    fn test_fetch_failure() {
        let service = InMemoryMessageService::new();
        service.fail_fetches(Some(ServiceError::Status(401)));
        assert_eq!(
            service.fetch_messages("/inbox", None).unwrap_err(),
            ServiceError::Status(401)
        );
    }
}

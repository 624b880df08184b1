//! HTTP message service
//!
//! Talks to the backend REST API. Uses synchronous HTTP (ureq) to be
//! executor-agnostic; callers fan out on their own threads.

use anyhow::Result;
use log::debug;
use ureq::Agent;

use super::MessageService;
use crate::config::InboxConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Message, MessageId};

/// HTTP client for the message backend
pub struct HttpMessageService {
    agent: Agent,
    base_url: String,
    mark_read_endpoint: String,
    mark_unread_endpoint: String,
}

impl HttpMessageService {
    /// Create a client from the inbox configuration
    pub fn new(config: &InboxConfig) -> Result<Self> {
        let base = config.base()?;

        let agent_config = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .build();

        Ok(Self {
            agent: Agent::new_with_config(agent_config),
            base_url: base.as_str().trim_end_matches('/').to_string(),
            mark_read_endpoint: config.mark_read_endpoint.clone(),
            mark_unread_endpoint: config.mark_unread_endpoint.clone(),
        })
    }

    /// Resolve an endpoint path against the base URL
    ///
    /// Absolute URLs are used as-is.
    fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Endpoint variant with the message id appended
    fn message_url(&self, endpoint: &str, id: &MessageId) -> String {
        format!("{}{}", self.resolve(endpoint), urlencoding::encode(id.as_str()))
    }

    /// Issue a bodiless PUT; success is any 2xx status
    fn put(&self, url: &str, token: Option<&str>) -> ServiceResult<()> {
        debug!("PUT {}", url);

        let mut request = self
            .agent
            .put(url)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", token);
        }

        request.send_empty()?;
        Ok(())
    }
}

impl MessageService for HttpMessageService {
    fn fetch_messages(&self, endpoint: &str, token: Option<&str>) -> ServiceResult<Vec<Message>> {
        let url = self.resolve(endpoint);
        debug!("GET {}", url);

        let mut request = self
            .agent
            .get(&url)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", token);
        }

        let mut response = request.call()?;
        response
            .body_mut()
            .read_json::<Vec<Message>>()
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn mark_as_read(&self, id: &MessageId, token: Option<&str>) -> ServiceResult<()> {
        self.put(&self.message_url(&self.mark_read_endpoint, id), token)
    }

    fn mark_as_unread(&self, id: &MessageId, token: Option<&str>) -> ServiceResult<()> {
        self.put(&self.message_url(&self.mark_unread_endpoint, id), token)
    }

    fn archive(&self, endpoint: &str, id: &MessageId, token: Option<&str>) -> ServiceResult<()> {
        self.put(&self.message_url(endpoint, id), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base_url: &str) -> HttpMessageService {
        let config = InboxConfig {
            base_url: base_url.to_string(),
            ..InboxConfig::default()
        };
        HttpMessageService::new(&config).unwrap()
    }

    #[test]
    fn test_resolve_paths() {
        let service = service("http://localhost:8080/");
        assert_eq!(
            service.resolve("/api/messages/receiver_get"),
            "http://localhost:8080/api/messages/receiver_get"
        );
        assert_eq!(
            service.resolve("api/messages/sender_get"),
            "http://localhost:8080/api/messages/sender_get"
        );
        assert_eq!(
            service.resolve("https://other.example.com/list"),
            "https://other.example.com/list"
        );
    }

    #[test]
    fn test_message_url_appends_id() {
        let service = service("http://localhost:8080");
        assert_eq!(
            service.message_url("/api/messages/archiveSender/", &MessageId::new("42")),
            "http://localhost:8080/api/messages/archiveSender/42"
        );
    }
}

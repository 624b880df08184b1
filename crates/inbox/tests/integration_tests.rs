//! Integration tests for the inbox crate
//!
//! These tests run the controller against the HTTP message service, backed
//! by a small HTTP stub listening on loopback.

use anyhow::Result;
use inbox::{
    BulkAction, ConfirmOutcome, ConfirmRequest, Dialogs, Folder, HttpMessageService,
    InMemoryTokenStore, InboxConfig, InboxController, MessageId, MessageService, Navigator,
    ServiceError,
};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const LISTING: &str = r#"[
    {"messageId": 1, "subject": "A", "dateTime": "2024-01-01T10:00:00Z", "read": false},
    {"messageId": 2, "subject": "B", "dateTime": "2024-02-01T10:00:00Z", "read": true}
]"#;

/// A request as seen by the stub
#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
}

impl RecordedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted answer for one method + path
struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: &'static str,
}

fn route(method: &'static str, path: &str, status: u16, body: &'static str) -> Route {
    Route {
        method,
        path: path.to_string(),
        status,
        body,
    }
}

/// Minimal HTTP/1.1 stub answering every connection once, then closing it
struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle_connection(stream, &routes, &recorded);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle_connection(
    mut stream: TcpStream,
    routes: &[Route],
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    drain_body(&mut reader, &headers);

    let (status, body) = routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .map(|r| (r.status, r.body))
        .unwrap_or((404, ""));

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path,
        headers,
    });

    let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();

    // Let the client read the response before the socket goes away
    let _ = stream.shutdown(Shutdown::Write);
    let _ = stream.set_read_timeout(Some(Duration::from_millis(200)));
    let _ = std::io::copy(&mut reader, &mut std::io::sink());
}

/// Consume a request body so that closing the socket does not reset it
fn drain_body(reader: &mut BufReader<TcpStream>, headers: &[(String, String)]) {
    let header = |name: &str| {
        headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.to_ascii_lowercase())
    };

    if let Some(length) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        let mut body = vec![0u8; length];
        let _ = reader.read_exact(&mut body);
    } else if header("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) if line.trim() == "0" => {
                    let _ = reader.read_line(&mut line);
                    return;
                }
                Ok(_) => {}
            }
        }
    }
}

struct AlwaysConfirm;

impl Dialogs for AlwaysConfirm {
    fn alert(&self, _text: &str) {}

    fn confirm(&self, _request: &ConfirmRequest) -> ConfirmOutcome {
        ConfirmOutcome::Confirmed
    }
}

struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn open(&self, _url: &str) -> Result<()> {
        Ok(())
    }
}

fn config_for(server: &StubServer) -> InboxConfig {
    InboxConfig {
        base_url: server.base_url.clone(),
        timeout_secs: 5,
        ..InboxConfig::default()
    }
}

fn controller_for(server: &StubServer, token: Option<&str>) -> InboxController {
    let config = config_for(server);
    let service = HttpMessageService::new(&config).unwrap();
    let tokens = match token {
        Some(token) => InMemoryTokenStore::with_access_token(token),
        None => InMemoryTokenStore::new(),
    };

    InboxController::new(
        config,
        Arc::new(service),
        Arc::new(tokens),
        Arc::new(AlwaysConfirm),
        Arc::new(NoopNavigator),
    )
}

#[test]
fn test_fetch_sends_token_and_renders_newest_first() {
    let server = StubServer::start(vec![route("GET", "/api/messages/receiver_get", 200, LISTING)]);
    let mut controller = controller_for(&server, Some("abc123"));

    assert_eq!(controller.refresh().unwrap(), 2);

    let ids: Vec<_> = controller.list().ids().into_iter().map(|id| id.0).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert!(controller.list().get(&MessageId::new("1")).unwrap().has_class("unread"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].header("Authorization"), Some("abc123"));
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
}

#[test]
fn test_missing_token_sends_no_authorization() {
    let server = StubServer::start(vec![route("GET", "/api/messages/receiver_get", 200, "[]")]);
    let mut controller = controller_for(&server, None);

    assert_eq!(controller.refresh().unwrap(), 0);
    assert_eq!(server.requests()[0].header("Authorization"), None);
}

#[test]
fn test_error_status_keeps_rendered_list() {
    let server = StubServer::start(vec![
        route("GET", "/api/messages/receiver_get", 200, LISTING),
        route("GET", "/api/messages/sender_get", 500, ""),
    ]);
    let mut controller = controller_for(&server, Some("abc123"));
    controller.refresh().unwrap();
    let before = controller.list().clone();

    let err = controller.select_folder(Folder::Outbox).unwrap_err();
    assert_eq!(err, ServiceError::Status(500));
    assert_eq!(controller.list(), &before);
}

#[test]
fn test_undecodable_body_is_decode_error() {
    let server = StubServer::start(vec![route(
        "GET",
        "/api/messages/receiver_get",
        200,
        r#"[{"messageId": 1, "dateTime": "someday"}]"#,
    )]);
    let config = config_for(&server);
    let service = HttpMessageService::new(&config).unwrap();

    let err = service
        .fetch_messages(&config.inbox_endpoint, Some("abc123"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[test]
fn test_toggle_marks_each_selected_message() {
    let server = StubServer::start(vec![
        route("GET", "/api/messages/receiver_get", 200, LISTING),
        route("PUT", "/api/messages/markAsRead/1", 200, ""),
        route("PUT", "/api/messages/markAsRead/2", 403, ""),
    ]);
    let mut controller = controller_for(&server, Some("abc123"));
    controller.refresh().unwrap();
    controller.set_checked(&MessageId::new("1"), true);
    controller.set_checked(&MessageId::new("2"), true);

    let status = controller.toggle_read();
    let outcome = status.outcome().unwrap();
    assert_eq!(outcome.action, BulkAction::MarkRead);
    assert_eq!(outcome.succeeded, vec![MessageId::new("1")]);
    assert_eq!(
        outcome.failed,
        vec![(MessageId::new("2"), ServiceError::Status(403))]
    );

    // Item 1 flipped, item 2 was already read and stays so
    assert!(controller.list().get(&MessageId::new("1")).unwrap().is_read());
    assert!(controller.list().get(&MessageId::new("2")).unwrap().is_read());

    let mut puts: Vec<_> = server
        .requests()
        .into_iter()
        .filter(|r| r.method == "PUT")
        .collect();
    puts.sort_by(|a, b| a.path.cmp(&b.path));
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0].path, "/api/messages/markAsRead/1");
    assert_eq!(puts[1].path, "/api/messages/markAsRead/2");
    assert!(puts.iter().all(|r| r.header("Authorization") == Some("abc123")));
}

#[test]
fn test_outbox_delete_uses_sender_archive() {
    let server = StubServer::start(vec![
        route("GET", "/api/messages/sender_get", 200, LISTING),
        route("PUT", "/api/messages/archiveSender/2", 200, ""),
    ]);
    let mut controller = controller_for(&server, Some("abc123"));
    controller.select_folder(Folder::Outbox).unwrap();
    controller.set_checked(&MessageId::new("2"), true);

    let status = controller.delete_selected();
    assert!(status.outcome().unwrap().all_succeeded());

    let ids: Vec<_> = controller.list().ids().into_iter().map(|id| id.0).collect();
    assert_eq!(ids, vec!["1"]);
    assert!(
        server
            .requests()
            .iter()
            .any(|r| r.method == "PUT" && r.path == "/api/messages/archiveSender/2")
    );
}

#[test]
fn test_unreachable_backend_is_transport_error() {
    // Bind and drop to get a port with nothing listening
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = InboxConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        timeout_secs: 5,
        ..InboxConfig::default()
    };
    let service = HttpMessageService::new(&config).unwrap();

    let err = service
        .mark_as_read(&MessageId::new("1"), Some("abc123"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

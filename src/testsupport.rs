//! Shared test fixtures for transport, operation and streaming test modules.
//!
//! `MockServer` is a one-shot HTTP/1.1 server on a loopback port: it accepts a
//! single connection, captures the raw request and replies with canned bytes,
//! then closes the connection. Close-delimited bodies make it usable for event
//! streams as well as plain JSON responses.

use std::collections::BTreeMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One request as observed by the mock server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Request body parsed as JSON; panics on malformed bodies.
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

pub struct MockServer {
    /// Base URL including the `/v1` API root.
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl MockServer {
    /// Serve one connection with the given raw HTTP response bytes.
    pub async fn respond_with(raw_response: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let captured = read_request(&mut stream).await;
            let _ = stream.write_all(raw_response.as_bytes()).await;
            let _ = stream.shutdown().await;
            captured
        });
        Self {
            base_url: format!("http://{addr}/v1"),
            handle,
        }
    }

    /// Serve a JSON body with the given status.
    pub async fn json(status: u16, body: &str) -> Self {
        Self::respond_with(http_response(status, "application/json", body)).await
    }

    /// Serve a 200 `text/event-stream` body, delimited by connection close.
    pub async fn event_stream(body: &str) -> Self {
        Self::respond_with(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nCache-Control: no-cache\r\nConnection: close\r\n\r\n{body}"
        ))
        .await
    }

    /// Wait for the served request.
    pub async fn captured(self) -> CapturedRequest {
        self.handle.await.expect("mock server task")
    }
}

/// Render a complete HTTP/1.1 response with a `Content-Length` body.
pub fn http_response(status: u16, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason_phrase(status),
        body.len(),
    )
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// Build one `data:` frame line.
pub fn sse_data_line(data: &str) -> String {
    format!("data: {data}\n\n")
}

/// Stream terminator used by GPT-3 event streams.
pub fn sse_done_line() -> &'static str {
    "data: [DONE]\n\n"
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = find(&raw, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.expect("read request");
        assert!(n > 0, "client closed before sending headers");
        raw.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    let headers: BTreeMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let body_start = header_end + 4;
    while raw.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.expect("read body");
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
    }
    let body_end = raw.len().min(body_start + content_length);
    let body = String::from_utf8_lossy(&raw[body_start..body_end]).into_owned();

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_response_sets_content_length() {
        let raw = http_response(404, "application/json", "{}");
        assert!(raw.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(raw.contains("Content-Length: 2\r\n"));
        assert!(raw.ends_with("\r\n\r\n{}"));
    }

    #[test]
    fn sse_helpers_emit_expected_wire_format() {
        assert_eq!(sse_data_line("{\"n\":1}"), "data: {\"n\":1}\n\n");
        assert_eq!(sse_done_line(), "data: [DONE]\n\n");
    }

    #[tokio::test]
    async fn mock_server_captures_request() {
        let server = MockServer::json(200, "{}").await;
        let url = format!("{}/echo", server.base_url);
        let response = reqwest::Client::new()
            .post(url)
            .header("X-Probe", "yes")
            .body("hello")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let captured = server.captured().await;
        assert_eq!(captured.method, "POST");
        assert_eq!(captured.path, "/v1/echo");
        assert_eq!(captured.header("x-probe"), Some("yes"));
        assert_eq!(captured.body, "hello");
    }
}

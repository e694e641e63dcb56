//! Outbound HTTP seam.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use http::StatusCode;

use crate::error::TransportError;
use crate::request::OutboundRequest;

/// Delivers a request and reports the response status.
///
/// Implementations make exactly one attempt; retries are out of scope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request once.
    async fn send(&self, request: OutboundRequest) -> Result<StatusCode, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: OutboundRequest) -> Result<StatusCode, TransportError> {
        (**self).send(request).await
    }
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("press-revalidate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<StatusCode, TransportError> {
        let timeout = request.timeout;
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(timeout);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        Ok(response.status())
    }
}

/// Transport that records requests instead of sending them.
///
/// Answers every request with a fixed result. Used for dry runs and tests.
#[derive(Debug)]
pub struct DryRunTransport {
    reply: Result<StatusCode, TransportError>,
    sent: Mutex<Vec<OutboundRequest>>,
}

impl Default for DryRunTransport {
    fn default() -> Self {
        Self::replying(Ok(StatusCode::OK))
    }
}

impl DryRunTransport {
    /// Create a transport answering 200.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport answering with a fixed result.
    pub fn replying(reply: Result<StatusCode, TransportError>) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn sent(&self) -> Vec<OutboundRequest> {
        self.recorded().clone()
    }

    /// Number of requests received so far.
    pub fn sent_count(&self) -> usize {
        self.recorded().len()
    }

    /// The recording survives a panic in another holder of the lock.
    fn recorded(&self) -> MutexGuard<'_, Vec<OutboundRequest>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for DryRunTransport {
    async fn send(&self, request: OutboundRequest) -> Result<StatusCode, TransportError> {
        self.recorded().push(request);
        self.reply.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::{RevalidationRequest, Secret};

    fn header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Accept one connection, read a full request, answer with `status_line`.
    async fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(end) = header_end(&buf) {
                    let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + len {
                        break;
                    }
                }
            }
            let reply = format!("{}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n", status_line);
            socket.write_all(reply.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{}/revalidate", addr), handle)
    }

    fn revalidation(url: &str) -> OutboundRequest {
        OutboundRequest::post(url)
            .json(&RevalidationRequest::new("/articles/x", &Secret::new("S")))
            .unwrap()
    }

    #[tokio::test]
    async fn test_http_transport_posts_json() {
        let (url, server) = serve_once("HTTP/1.1 200 OK").await;
        let transport = HttpTransport::new().unwrap();

        let status = transport.send(revalidation(&url)).await.unwrap();
        assert_eq!(status, StatusCode::OK);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /revalidate HTTP/1.1"));
        assert!(raw.to_lowercase().contains("content-type: application/json"));
        assert!(raw.ends_with(r#"{"path":"/articles/x","secret":"S"}"#));
    }

    #[tokio::test]
    async fn test_http_transport_reports_status() {
        let (url, server) = serve_once("HTTP/1.1 401 Unauthorized").await;
        let transport = HttpTransport::new().unwrap();

        let status = transport.send(revalidation(&url)).await.unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new().unwrap();
        let err = transport
            .send(revalidation(&format!("http://{}/", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)));
    }

    #[tokio::test]
    async fn test_http_transport_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let transport = HttpTransport::new().unwrap();
        let request = revalidation(&format!("http://{}/", addr)).timeout(Duration::from_millis(200));
        let err = transport.send(request).await.unwrap_err();
        assert_eq!(err, TransportError::Timeout(Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_dry_run_records() {
        let transport = DryRunTransport::replying(Ok(StatusCode::ACCEPTED));
        let status = transport.send(revalidation("https://e")).await.unwrap();

        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(transport.sent_count(), 1);
        assert_eq!(transport.sent()[0].url, "https://e");
    }

    #[tokio::test]
    async fn test_dry_run_records_after_poisoned_lock() {
        let transport = Arc::new(DryRunTransport::new());
        transport.send(revalidation("https://e/first")).await.unwrap();

        let poisoner = transport.clone();
        let panicked = std::thread::spawn(move || {
            let _guard = poisoner.sent.lock().unwrap();
            panic!("poison the recording");
        })
        .join();
        assert!(panicked.is_err());
        assert!(transport.sent.is_poisoned());

        transport.send(revalidation("https://e/second")).await.unwrap();
        assert_eq!(transport.sent_count(), 2);
        let urls: Vec<String> = transport.sent().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["https://e/first", "https://e/second"]);
    }
}

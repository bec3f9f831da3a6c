//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use saludo_gateway::config::FunctionAppConfig;
use saludo_gateway::http::HttpServer;
use saludo_gateway::lifecycle::Shutdown;
use saludo_gateway::observability::TracingSink;
use sdk_rust::FunctionClient;

/// A canned upstream reply.
#[derive(Clone)]
pub struct MockReply {
    pub status_line: &'static str,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl MockReply {
    pub fn new(status_line: &'static str, content_type: Option<&'static str>, body: &str) -> Self {
        Self {
            status_line,
            content_type,
            body: body.to_string(),
        }
    }
}

/// Request heads (request line + headers) seen by a mock upstream.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl Recorded {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<String> {
        self.0.lock().unwrap().last().cloned()
    }

    /// Request line of the most recent request, e.g. `GET /saludo HTTP/1.1`.
    pub fn last_request_line(&self) -> Option<String> {
        self.last()
            .and_then(|head| head.lines().next().map(str::to_owned))
    }

    /// Header value from the most recent request (case-insensitive name).
    pub fn last_header(&self, name: &str) -> Option<String> {
        let head = self.last()?;
        head.lines().skip(1).find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim()
                .eq_ignore_ascii_case(name)
                .then(|| v.trim().to_string())
        })
    }
}

/// Start a mock upstream on an ephemeral port that answers every request
/// with `reply`, recording each request head.
pub async fn start_mock_upstream(reply: MockReply) -> (SocketAddr, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = Recorded::default();
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let reply = reply.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }
                        log.0
                            .lock()
                            .unwrap()
                            .push(String::from_utf8_lossy(&buf).into_owned());

                        let content_type = reply
                            .content_type
                            .map(|ct| format!("Content-Type: {}\r\n", ct))
                            .unwrap_or_default();
                        let response_str = format!(
                            "HTTP/1.1 {}\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            reply.status_line,
                            content_type,
                            reply.body.len(),
                            reply.body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Start an upstream that promises a 100-byte body, sends 5 bytes and hangs
/// up.
#[allow(dead_code)]
pub async fn start_truncating_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\nhello",
                    )
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the function host on an ephemeral port.
pub async fn start_host(config: FunctionAppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_parts(config, http_client(), Arc::new(TracingSink));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Host config pointing at `upstream` with a fixed subscription key.
pub fn config_for(upstream: &str) -> FunctionAppConfig {
    let mut config = FunctionAppConfig::default();
    config.upstream.endpoint_url = Some(upstream.to_string());
    config.upstream.subscription_key = Some("test-subscription-key".to_string());
    config
}

/// HTTP client that ignores any proxy set in the environment.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// SDK client pointed at a running host.
pub fn function_client(host: SocketAddr) -> FunctionClient {
    FunctionClient::new(&format!("http://{}", host)).with_http_client(http_client())
}

//! Shared utilities for integration testing: a programmable mock upstream
//! and a helper that boots the gateway on an ephemeral port.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use ai_gateway::config::{GatewayConfig, GatewaySettings, SettingsSource, UpstreamConfig};
use ai_gateway::gateway::{PromptTable, UpstreamClient};
use ai_gateway::{HttpServer, Shutdown};

pub const GATEWAY_KEY: &str = "test-gateway-key";
#[allow(dead_code)]
pub const UPSTREAM_KEY: &str = "sk-upstream-test";

/// A request as received by the mock upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

#[allow(dead_code)]
impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("upstream body should be JSON")
    }
}

/// Handle to a running mock upstream.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// The closure decides the status and body of every response; it may sleep
/// to simulate a slow upstream.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> MockUpstream
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let sink = captured.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        if let Some(request) = read_request(&mut socket).await {
                            sink.lock().unwrap().push(request);
                        }
                        let (status, body) = f().await;
                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, captured }
}

/// Mock upstream that always answers with one completion choice.
#[allow(dead_code)]
pub async fn start_completion_upstream(content: &'static str) -> MockUpstream {
    start_programmable_upstream(move || async move {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
            ]
        });
        (200, body.to_string())
    })
    .await
}

/// Mock upstream that answers `status` with a declared `Content-Length` it
/// never fulfils, then closes the connection.
#[allow(dead_code)]
pub async fn start_truncated_upstream(status: u16) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let sink = captured.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let sink = sink.clone();
            tokio::spawn(async move {
                if let Some(request) = read_request(&mut socket).await {
                    sink.lock().unwrap().push(request);
                }
                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: 1000\r\nConnection: close\r\n\r\n{{\"err",
                    status,
                    reason(status)
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.flush().await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockUpstream { addr, captured }
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[head_end..]).to_string();
    Some(CapturedRequest { head, body })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Settings pointing at `upstream` with both secrets configured.
#[allow(dead_code)]
pub fn settings_for(upstream: &MockUpstream) -> GatewaySettings {
    GatewaySettings {
        gateway_key: Some(GATEWAY_KEY.to_string()),
        upstream: UpstreamConfig {
            base_url: upstream.base_url(),
            api_key: Some(UPSTREAM_KEY.to_string()),
            model: "test-model".to_string(),
        },
    }
}

/// A running gateway; dropping it leaves the server up until `stop`.
pub struct TestGateway {
    pub base_url: String,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Boot the gateway on an ephemeral port with fixed settings.
pub async fn start_gateway(config: GatewayConfig, settings: GatewaySettings) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let prompts = Arc::new(PromptTable::from_config(&config.prompts));
    let upstream = UpstreamClient::from_client(client(), prompts)
        .with_timeout(Duration::from_secs(config.timeouts.upstream_secs));

    let shutdown = Shutdown::new();
    let server =
        HttpServer::with_completions(config, SettingsSource::fixed(settings), Arc::new(upstream));
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestGateway {
        base_url: format!("http://{}", addr),
        shutdown,
    }
}

/// Client that never reuses connections and ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

//! Shared helpers: a wiremock stand-in for the leasing provider.

#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tjleasing::application::gateway::LeasingGateway;
use tjleasing::domain::credentials::Credentials;
use tjleasing::infrastructure::http::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, ReqwestSender,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const USER: &str = "user";
pub const PASSWORD: &str = "secret";
/// base64("user:secret")
pub const BASIC_HEADER: &str = "Basic dXNlcjpzZWNyZXQ=";
pub const ACCESS_TOKEN: &str = "tok-123";

pub async fn start_provider() -> MockServer {
    MockServer::start().await
}

pub async fn mount_token(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/LizingAPI/GetToken"))
        .and(header("Authorization", BASIC_HEADER))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_token_ok(server: &MockServer) {
    mount_token(
        server,
        200,
        &format!(r#"{{"access_token":"{}"}}"#, ACCESS_TOKEN),
    )
    .await;
}

pub fn sender() -> ReqwestSender {
    ReqwestSender::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT).unwrap()
}

pub async fn gateway_for(base_url: &str) -> LeasingGateway {
    LeasingGateway::initialize(
        Box::new(sender()),
        Credentials::new(base_url, USER, PASSWORD),
    )
    .await
    .unwrap()
}

pub async fn requests_to(server: &MockServer, target: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|req| req.url.path() == target)
        .collect()
}

pub fn authorization(req: &Request) -> Option<String> {
    req.headers
        .get("authorization")
        .map(|value| value.to_str().unwrap_or_default().to_string())
}

/// Writes a canned emulator response under `<root>/TJLeasingGateway/`.
pub fn write_canned(root: &Path, name: &str, status: u16, body: &str) {
    let folder = root.join("TJLeasingGateway");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join(name), format!("{}\n{}", status, body)).unwrap();
}

/// A provider that answers every request `200 OK` with a body cut off after a
/// few bytes. Returns its base URL.
pub async fn start_truncating_provider() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut seen: Vec<u8> = Vec::new();
                let mut buf = [0u8; 4096];
                let head_end = loop {
                    if let Some(pos) = seen.windows(4).position(|w| w == b"\r\n\r\n") {
                        break pos + 4;
                    }
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => seen.extend_from_slice(&buf[..n]),
                    }
                };
                let head = String::from_utf8_lossy(&seen[..head_end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                while seen.len() < head_end + length {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => seen.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"ok",
                    )
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{}", addr)
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes debug-level logs of the current thread into a buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}

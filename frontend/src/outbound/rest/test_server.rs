//! One-shot HTTP server for adapter tests.
//!
//! Accepts a single connection, records the raw request, and answers with a
//! canned JSON response.

use reqwest::{Client, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::ApiClient;

pub(super) struct CannedServer {
    base_url: Url,
    handle: JoinHandle<Vec<u8>>,
}

impl CannedServer {
    pub(super) async fn start(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let addr = listener.local_addr().expect("listener address");
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept connection");
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
            request
        });
        let base_url = Url::parse(&format!("http://{addr}/api/v1")).expect("server url");
        Self { base_url, handle }
    }

    pub(super) fn client(&self) -> ApiClient {
        let client = Client::builder().no_proxy().build().expect("reqwest client");
        ApiClient::with_client(client, self.base_url.clone())
    }

    /// Raw request as lossy UTF-8, once the server has answered.
    pub(super) async fn request(self) -> String {
        let raw = self.handle.await.expect("server task");
        String::from_utf8_lossy(&raw).into_owned()
    }
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = socket.read(&mut chunk).await.expect("read request");
        if read == 0 {
            return buffer;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(end) = header_end(&buffer) {
            if buffer.len() >= end + content_length(&buffer[..end]) {
                return buffer;
            }
        }
    }
}

fn header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|index| index + 4)
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0)
}

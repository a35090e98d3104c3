//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bluegreen_watcher::alert::{AlertIntent, AlertKind};
use bluegreen_watcher::clock::ManualClock;
use bluegreen_watcher::config::DetectionConfig;
use bluegreen_watcher::Watcher;
use chrono::{DateTime, TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 30, 12, 0, 0).unwrap()
}

/// An nginx line in the deployment's custom log format.
pub fn access_line(pool: &str, status: u16) -> String {
    format!(
        r#"172.18.0.1 - - [30/Oct/2025:12:00:00 +0000] "GET /version HTTP/1.1" {status} 57 "-" "curl/8.5.0" pool={pool} release={pool}-1.0.0 upstream_status={status} upstream_addr=172.18.0.2:3000 request_time=0.003 upstream_response_time=0.003"#
    )
}

/// Watcher collecting admitted alerts in memory, driven by a manual clock.
pub fn watcher(config: DetectionConfig) -> (Watcher<Vec<AlertIntent>>, ManualClock) {
    let clock = ManualClock::new(t0());
    let watcher = Watcher::new(&config, Arc::new(clock.clone()), Vec::new());
    (watcher, clock)
}

pub fn count_kind(alerts: &[AlertIntent], kind: AlertKind) -> usize {
    alerts.iter().filter(|a| a.kind() == kind).count()
}

/// A mock Slack-style webhook that records request bodies.
pub struct MockWebhook {
    pub addr: SocketAddr,
    pub bodies: Arc<Mutex<Vec<String>>>,
}

impl MockWebhook {
    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    pub fn received(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    /// Wait until at least `n` bodies arrived or `limit` passes.
    pub async fn wait_for(&self, n: usize, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            if self.bodies.lock().unwrap().len() >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

/// Start a webhook whose status code is decided per call by `f(call_index)`.
pub async fn start_programmable_webhook<F, Fut>(f: F) -> MockWebhook
where
    F: Fn(usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = u16> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(Mutex::new(0usize));
    let f = Arc::new(f);

    let recorded = bodies.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    let calls = calls.clone();
                    tokio::spawn(async move {
                        let body = read_request_body(&mut socket).await.unwrap_or_default();
                        let call = {
                            let mut calls = calls.lock().unwrap();
                            *calls += 1;
                            *calls - 1
                        };
                        let status = f(call).await;
                        if (200..300).contains(&status) {
                            recorded.lock().unwrap().push(body);
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                            status_text
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockWebhook { addr, bodies }
}

/// Start a webhook that always answers 200.
pub async fn start_mock_webhook() -> MockWebhook {
    start_programmable_webhook(|_| async { 200 }).await
}

async fn read_request_body(socket: &mut TcpStream) -> std::io::Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(String::new());
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            if buf.len() >= start + length {
                return Ok(String::from_utf8_lossy(&buf[start..start + length]).into_owned());
            }
        }
    }
}

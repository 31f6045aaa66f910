//! Common test utilities for candle feed integration tests
//!
//! Provides a minimal HTTP server standing in for `/api/data` and a scripted
//! in-process candle source.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use candles::client::Result as FeedResult;
use candles::{CandleRecord, CandleSource, FeedError};
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Feed body used across tests: two KRW-BTC candles and one KRW-ETH candle
pub const SAMPLE_FEED: &str = r#"[
    {"market": "KRW-BTC", "candle_date_time_utc": "T1", "opening_price": 1, "high_price": 2,
     "low_price": 0.5, "trade_price": 1.5, "candle_acc_trade_volume": 10, "source": "A"},
    {"market": "KRW-BTC", "candle_date_time_utc": "T2", "opening_price": 1.5, "high_price": 2.5,
     "low_price": 1, "trade_price": 2, "candle_acc_trade_volume": 12, "source": "B"},
    {"market": "KRW-ETH", "candle_date_time_utc": "T1", "opening_price": "3000.5", "high_price": "3010",
     "low_price": "2990", "trade_price": "3005", "candle_acc_trade_volume": 7, "source": "Upbit"}
]"#;

pub fn sample_records() -> Vec<CandleRecord> {
    serde_json::from_str(SAMPLE_FEED).unwrap()
}

// ============================================================================
// Mock HTTP server
// ============================================================================

/// Canned HTTP response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    fn to_http(&self) -> String {
        let reason = match self.status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            _ => "Status",
        };

        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status,
            reason,
            self.body.len(),
            self.body
        )
    }
}

struct ServerState {
    queued: VecDeque<MockResponse>,
    fallback: MockResponse,
    request_lines: Vec<String>,
}

/// A tiny HTTP/1.1 server answering every request with queued or fallback responses
pub struct MockFeedServer {
    pub addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
    shutdown: Arc<Notify>,
}

impl MockFeedServer {
    /// Start a server that answers with `fallback` once the queue is empty
    pub async fn start(fallback: MockResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(ServerState {
            queued: VecDeque::new(),
            fallback,
            request_lines: Vec::new(),
        }));
        let shutdown = Arc::new(Notify::new());

        let state_clone = state.clone();
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let state = state_clone.clone();
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, state).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            state,
            shutdown,
        }
    }

    async fn handle_connection(mut stream: TcpStream, state: Arc<Mutex<ServerState>>) {
        let mut buf = Vec::with_capacity(1024);
        let mut chunk = [0u8; 1024];

        // Read until the end of the request headers; GET has no body
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) => return,
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") || buf.len() > 16 * 1024 {
                        break;
                    }
                }
                Err(_) => return,
            }
        }

        let request = String::from_utf8_lossy(&buf);
        let request_line = request.lines().next().unwrap_or_default().to_string();

        let response = {
            let mut state = state.lock();
            state.request_lines.push(request_line);
            let queued = state.queued.pop_front();
            queued.unwrap_or_else(|| state.fallback.clone())
        };

        let _ = stream.write_all(response.to_http().as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer the next request with `response`
    pub fn enqueue(&self, response: MockResponse) {
        self.state.lock().queued.push_back(response);
    }

    /// Request lines received so far, e.g. `GET /api/data HTTP/1.1`
    pub fn request_lines(&self) -> Vec<String> {
        self.state.lock().request_lines.clone()
    }

    pub fn stop(&self) {
        self.shutdown.notify_one();
    }
}

/// Base URL of a port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// ============================================================================
// Scripted source
// ============================================================================

/// In-process candle source returning scripted results, then a fixed batch
pub struct ScriptedSource {
    script: Mutex<VecDeque<FeedResult<Vec<CandleRecord>>>>,
    fallback: Vec<CandleRecord>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(fallback: Vec<CandleRecord>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn then_ok(self, records: Vec<CandleRecord>) -> Self {
        self.script.lock().push_back(Ok(records));
        self
    }

    /// Script a body that failed to decode
    pub fn then_err(self, message: &str) -> Self {
        self.script
            .lock()
            .push_back(Err(FeedError::DeserializeFailed(message.to_string())));
        self
    }

    /// Script a non-success HTTP status
    pub fn then_status(self, code: u16) -> Self {
        let status = reqwest::StatusCode::from_u16(code).unwrap();
        self.script.lock().push_back(Err(FeedError::BadStatus(status)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandleSource for ScriptedSource {
    async fn fetch_candles(&self) -> FeedResult<Vec<CandleRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

//! Shared utilities for pipeline integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api_pipeline::error::LoggingFailure;
use api_pipeline::logging::{LogProperties, RequestLog, RequestLogEntry, Severity};
use api_pipeline::monitoring::{AuditChannel, MonitoringSink, PROTECTIVE_MONITORING_CHANNEL};
use api_pipeline::request::RequestDescriptor;
use api_pipeline::{RawResponse, Transport, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A captured request log event.
#[derive(Debug, Clone)]
pub struct LoggedEvent {
    pub severity: Severity,
    pub correlation_id: Option<String>,
    pub http_method: String,
    pub url: String,
    pub message: String,
    pub properties: LogProperties,
}

/// Request log sink that records every event.
#[derive(Default)]
pub struct RecordingLog {
    events: Mutex<Vec<LoggedEvent>>,
    fail: bool,
}

impl RecordingLog {
    /// A sink that records, then reports a failure for every event.
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn events(&self) -> Vec<LoggedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.events().iter().filter(|e| e.severity == severity).count()
    }

    fn record(&self, severity: Severity, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        self.events.lock().unwrap().push(LoggedEvent {
            severity,
            correlation_id: entry.correlation_id.map(str::to_string),
            http_method: entry.http_method.to_string(),
            url: entry.url.to_string(),
            message: entry.message.to_string(),
            properties: entry.properties.clone(),
        });
        if self.fail {
            Err(LoggingFailure("sink unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl RequestLog for RecordingLog {
    fn log_request_debug(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        self.record(Severity::Debug, entry)
    }

    fn log_request_info(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        self.record(Severity::Info, entry)
    }

    fn log_request_error(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        self.record(Severity::Error, entry)
    }
}

/// Monitoring sink exposing one recording `protective-monitoring` channel.
#[derive(Default)]
pub struct RecordingMonitor {
    channel: Arc<RecordingChannel>,
}

#[derive(Default)]
pub struct RecordingChannel {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingMonitor {
    /// `(level, line)` pairs in emission order.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        self.channel.lines.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.lines().len()
    }
}

impl AuditChannel for RecordingChannel {
    fn info(&self, line: &str) {
        self.lines.lock().unwrap().push(("info", line.to_string()));
    }

    fn error(&self, line: &str) {
        self.lines.lock().unwrap().push(("error", line.to_string()));
    }
}

impl MonitoringSink for RecordingMonitor {
    fn channel(&self, name: &str) -> Option<Arc<dyn AuditChannel>> {
        (name == PROTECTIVE_MONITORING_CHANNEL).then(|| self.channel.clone() as Arc<dyn AuditChannel>)
    }
}

/// Transport replaying scripted outcomes and recording what it was sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    sent: Mutex<Vec<RequestDescriptor>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(outcomes: impl IntoIterator<Item = Result<RawResponse, TransportError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn respond(status: u16, data: serde_json::Value) -> Self {
        let response = RawResponse::new(status, data);
        if (200..400).contains(&status) {
            Self::new([Ok(response)])
        } else {
            Self::new([Err(TransportError::status(response))])
        }
    }

    pub fn refuse() -> Self {
        Self::new([Err(TransportError::no_response("connect ECONNREFUSED 127.0.0.1:80"))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::no_response("no scripted outcome")))
    }
}

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ReceivedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<ReceivedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n").filter(|l| !l.is_empty());
    let request_line = lines.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(ReceivedRequest { request_line, headers, body })
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` receives each request and returns `(status, body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(ReceivedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                let (status, body) = f(request).await;
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    status_text(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

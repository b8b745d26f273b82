//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! validated RequestDescriptor
//!     → Transport::send (exactly once, no retries)
//!     → Ok(RawResponse)             status in 200..400
//!     → Err(TransportError::Status)  any other status, response attached
//!     → Err(TransportError::NoResponse) no status ever received
//! ```
//!
//! # Design Decisions
//! - The pipeline depends on the `Transport` trait, not on a concrete client
//! - Connection handling, TLS, redirects and timeouts live in the transport
//! - Response bodies are decoded to JSON when possible, text otherwise

pub mod client;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{Headers, RequestDescriptor};

pub use client::ReqwestTransport;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Headers,
    pub data: Value,
}

impl RawResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self {
            status,
            headers: Headers::new(),
            data,
        }
    }

    /// True for statuses in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Status range a transport reports as a completed call.
pub fn is_completed_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Decode a response body: JSON if it parses, text otherwise, null when empty.
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Injected HTTP capability.
pub trait Transport: Send + Sync {
    /// Perform one HTTP call for `request`.
    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

//! Per-call request logging.
//!
//! # Responsibilities
//! - Log one "begin" event before dispatch
//! - Log exactly one terminal event: "end" on success, "error" on failure
//! - Choose severity from the request classification
//!
//! # Design Decisions
//! - Logging is advisory: sink failures are reported and dropped
//! - Error severity is never downgraded by classification

use std::sync::Arc;

use serde_json::Value;

use crate::error::{LoggingFailure, TransportError};
use crate::logging::classify::{classify, Severity};
use crate::logging::sink::{RequestLog, RequestLogEntry};
use crate::logging::LogProperties;
use crate::request::{correlation, RequestDescriptor};

pub const BEGIN_MESSAGE: &str = "Request started";
pub const END_MESSAGE: &str = "Request completed";
pub const ERROR_MESSAGE: &str = "Request failed";

/// Logs the lifecycle of dispatched requests to a [`RequestLog`] sink.
#[derive(Clone)]
pub struct RequestLogger {
    sink: Arc<dyn RequestLog>,
}

impl RequestLogger {
    pub fn new(sink: Arc<dyn RequestLog>) -> Self {
        Self { sink }
    }

    pub fn log_begin(&self, descriptor: &RequestDescriptor) {
        let severity = classify(descriptor.url()).lifecycle_severity();
        let properties = descriptor.logging_metadata().cloned().unwrap_or_default();
        self.write(severity, descriptor, BEGIN_MESSAGE, &properties);
    }

    pub fn log_end(&self, descriptor: &RequestDescriptor, status: u16) {
        let severity = classify(descriptor.url()).lifecycle_severity();
        let mut properties = descriptor.logging_metadata().cloned().unwrap_or_default();
        properties.insert("statusCode".to_string(), Value::from(status));
        self.write(severity, descriptor, END_MESSAGE, &properties);
    }

    pub fn log_error(&self, descriptor: &RequestDescriptor, error: &TransportError) {
        let mut properties = descriptor.logging_metadata().cloned().unwrap_or_default();
        properties.insert("errorStatusCode".to_string(), Value::String(error.status_marker()));
        properties.insert("errorMessage".to_string(), Value::String(error.to_string()));
        if let Some(data) = error.response().map(|r| &r.data).filter(|d| !d.is_null()) {
            properties.insert("errorData".to_string(), data.clone());
        }
        self.write(Severity::Error, descriptor, ERROR_MESSAGE, &properties);
    }

    fn write(
        &self,
        severity: Severity,
        descriptor: &RequestDescriptor,
        message: &str,
        properties: &LogProperties,
    ) {
        let entry = RequestLogEntry {
            correlation_id: correlation::extract(descriptor),
            http_method: descriptor.method().map(|m| m.as_str()).unwrap_or("-"),
            url: descriptor.url(),
            message,
            properties,
        };

        let result: Result<(), LoggingFailure> = match severity {
            Severity::Debug => self.sink.log_request_debug(&entry),
            Severity::Info => self.sink.log_request_info(&entry),
            Severity::Error => self.sink.log_request_error(&entry),
        };

        if let Err(e) = result {
            tracing::warn!(url = %descriptor.url(), error = %e, "Request log sink failed");
        }
    }
}

impl std::fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLogger").finish_non_exhaustive()
    }
}

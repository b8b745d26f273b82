//! Request log sink capability and its `tracing` implementation.

use crate::error::LoggingFailure;
use crate::logging::LogProperties;
use crate::request::correlation::MISSING_CORRELATION_ID;

/// One request log event.
#[derive(Debug, Clone, Copy)]
pub struct RequestLogEntry<'a> {
    pub correlation_id: Option<&'a str>,
    pub http_method: &'a str,
    pub url: &'a str,
    pub message: &'a str,
    pub properties: &'a LogProperties,
}

/// Severity-keyed request logging operations.
///
/// Implementations must be safe for concurrent use by in-flight calls.
pub trait RequestLog: Send + Sync {
    fn log_request_debug(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure>;
    fn log_request_info(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure>;
    fn log_request_error(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure>;
}

/// Writes request events as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRequestLog;

fn render_properties(properties: &LogProperties) -> String {
    serde_json::to_string(properties).unwrap_or_else(|_| "{}".to_string())
}

impl RequestLog for TracingRequestLog {
    fn log_request_debug(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        tracing::debug!(
            correlation_id = entry.correlation_id.unwrap_or(MISSING_CORRELATION_ID),
            method = entry.http_method,
            url = entry.url,
            properties = %render_properties(entry.properties),
            "{}",
            entry.message
        );
        Ok(())
    }

    fn log_request_info(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        tracing::info!(
            correlation_id = entry.correlation_id.unwrap_or(MISSING_CORRELATION_ID),
            method = entry.http_method,
            url = entry.url,
            properties = %render_properties(entry.properties),
            "{}",
            entry.message
        );
        Ok(())
    }

    fn log_request_error(&self, entry: &RequestLogEntry<'_>) -> Result<(), LoggingFailure> {
        tracing::error!(
            correlation_id = entry.correlation_id.unwrap_or(MISSING_CORRELATION_ID),
            method = entry.http_method,
            url = entry.url,
            properties = %render_properties(entry.properties),
            "{}",
            entry.message
        );
        Ok(())
    }
}

//! Metrics collection.
//!
//! # Metrics
//! - `api_requests_total` (counter): calls by method, status, request kind
//! - `api_request_duration_seconds` (histogram): transport latency by method
//! - `api_audit_events_total` (counter): audit records by outcome
//!
//! # Design Decisions
//! - Failed calls use the same status marker as the error log
//! - Exposition is left to the host process recorder

use std::time::Instant;

use crate::logging::RequestKind;

/// Record a completed (or failed) call.
pub fn record_request(method: &str, status: &str, kind: RequestKind, start: Instant) {
    metrics::counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "kind" => kind.as_str()
    )
    .increment(1);
    metrics::histogram!("api_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record an emitted audit record.
pub fn record_audit_event(outcome: &'static str) {
    metrics::counter!("api_audit_events_total", "outcome" => outcome).increment(1);
}

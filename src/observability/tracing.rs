//! Per-call spans.
//!
//! Each dispatched call runs inside an `api_request` span so transport and
//! sink events can be joined on the correlation ID.

use tracing::Span;

use crate::request::correlation::{self, MISSING_CORRELATION_ID};
use crate::request::RequestDescriptor;

/// Span for one pipeline call.
pub fn request_span(descriptor: &RequestDescriptor) -> Span {
    tracing::info_span!(
        "api_request",
        method = descriptor.method().map(|m| m.as_str()).unwrap_or("-"),
        url = %descriptor.url(),
        correlation_id = correlation::extract(descriptor).unwrap_or(MISSING_CORRELATION_ID),
    )
}

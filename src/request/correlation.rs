//! Correlation ID propagation.
//!
//! # Responsibilities
//! - Inject the originating request ID into outgoing headers
//! - Extract it again for logging and audits
//! - Generate a fresh ID (UUID v4) for callers without an inbound one
//!
//! # Design Decisions
//! - A single fixed header name shared by every service
//! - An ID already present in caller headers is never overwritten
//! - Absence is a normal condition, not an error

use uuid::Uuid;

use crate::request::descriptor::{Headers, RequestDescriptor};

/// Header carrying the correlation ID between services.
pub const CORRELATION_ID_HEADER: &str = "X-VMD-Request-Id";

/// Placeholder logged when a request carries no correlation ID.
pub const MISSING_CORRELATION_ID: &str = "-";

/// Read the correlation ID of a descriptor, if any.
pub fn extract(descriptor: &RequestDescriptor) -> Option<&str> {
    descriptor
        .headers()
        .get(CORRELATION_ID_HEADER)
        .filter(|id| !id.is_empty())
}

/// Add `correlation_id` to `headers` unless one is already set.
///
/// Returns true if the header was written.
pub fn inject(headers: &mut Headers, correlation_id: &str) -> bool {
    if correlation_id.is_empty() {
        return false;
    }
    let inserted = headers.insert_if_absent(CORRELATION_ID_HEADER, correlation_id);
    if !inserted {
        tracing::debug!(
            header = CORRELATION_ID_HEADER,
            "Caller supplied correlation header, keeping existing value"
        );
    }
    inserted
}

/// Generate a new correlation ID.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_is_none() {
        let descriptor = RequestDescriptor::new("https://x/y", Headers::new());
        assert_eq!(extract(&descriptor), None);
    }

    #[test]
    fn test_inject_then_extract() {
        let mut headers = Headers::new();
        assert!(inject(&mut headers, "req-123"));
        let descriptor = RequestDescriptor::new("https://x/y", headers);
        assert_eq!(extract(&descriptor), Some("req-123"));
    }

    #[test]
    fn test_inject_does_not_overwrite() {
        let mut headers: Headers = [("x-vmd-request-id", "caller")].into_iter().collect();
        assert!(!inject(&mut headers, "builder"));
        assert_eq!(headers.get(CORRELATION_ID_HEADER), Some("caller"));
    }

    #[test]
    fn test_empty_id_is_ignored() {
        let mut headers = Headers::new();
        assert!(!inject(&mut headers, ""));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_generate_is_uuid() {
        let id = generate();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, generate());
    }
}

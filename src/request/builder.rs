//! Request descriptor construction and dispatch validation.
//!
//! # Responsibilities
//! - Assemble a descriptor from url, headers, body and correlation ID
//! - Default the content type to JSON
//! - Enforce the dispatch invariant (method, url, content type)
//!
//! # Design Decisions
//! - Pure functions: no I/O, no environment lookups
//! - Validation is separate from building so hand-built descriptors are
//!   checked too; the invoker always calls it right before the transport
//! - Component identity is passed in explicitly, never read from globals

use serde_json::Value;

use crate::error::ConfigError;
use crate::request::correlation;
use crate::request::descriptor::{Headers, RequestDescriptor, SizeLimits};

/// Content type header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Content type applied when the caller supplies none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Organisation reference header used for downstream authorisation.
pub const ORGANISATION_REFERENCE_HEADER: &str = "vmd-orgref";

/// User ID header used for downstream authorisation.
pub const USER_ID_HEADER: &str = "vmd-userid";

/// Builds descriptors on behalf of one calling component.
#[derive(Debug, Clone, Default)]
pub struct RequestConfigBuilder {
    component: Option<String>,
}

impl RequestConfigBuilder {
    /// Create a builder that tags descriptors with `component` in their
    /// logging metadata.
    pub fn new(component: impl Into<String>) -> Self {
        let component = component.into();
        Self {
            component: (!component.is_empty()).then_some(component),
        }
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// Build a descriptor. See [`build`].
    pub fn build(
        &self,
        url: &str,
        headers: Option<Headers>,
        body: Option<Value>,
        correlation_id: Option<&str>,
    ) -> Result<RequestDescriptor, ConfigError> {
        let descriptor = build(url, headers, body, correlation_id)?;
        Ok(match &self.component {
            Some(component) => descriptor.with_metadata_entry("component", component.clone()),
            None => descriptor,
        })
    }
}

/// Build a request descriptor.
///
/// Fails with [`ConfigError::MissingUrl`] for an empty url and
/// [`ConfigError::InvalidHeader`] for a header that is not valid HTTP. A
/// missing or blank `Content-Type` defaults to `application/json`. The
/// correlation ID is only written when the caller's headers don't already
/// carry one.
pub fn build(
    url: &str,
    headers: Option<Headers>,
    body: Option<Value>,
    correlation_id: Option<&str>,
) -> Result<RequestDescriptor, ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::MissingUrl);
    }

    let mut headers = headers.unwrap_or_default();
    if !has_content_type(&headers) {
        headers.insert(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
    }

    if let Some(id) = correlation_id {
        correlation::inject(&mut headers, id);
    }

    headers.to_header_map()?;

    let descriptor = RequestDescriptor::new(url, headers);
    Ok(match body {
        Some(body) => descriptor.with_body(body),
        None => descriptor,
    })
}

/// Check the dispatch invariant.
pub fn validate(descriptor: &RequestDescriptor) -> Result<(), ConfigError> {
    if descriptor.method().is_none() {
        return Err(ConfigError::MissingMethod);
    }
    if descriptor.url().trim().is_empty() {
        return Err(ConfigError::MissingUrl);
    }
    descriptor.headers().to_header_map()?;
    if !has_content_type(descriptor.headers()) {
        return Err(ConfigError::MissingContentType);
    }
    Ok(())
}

/// A blank `Content-Type` counts as missing.
fn has_content_type(headers: &Headers) -> bool {
    headers
        .get(CONTENT_TYPE)
        .is_some_and(|value| !value.trim().is_empty())
}

/// Limit the serialized request body. Zero is rejected.
pub fn with_max_request_bytes(
    descriptor: RequestDescriptor,
    max_request_bytes: usize,
) -> Result<RequestDescriptor, ConfigError> {
    if max_request_bytes == 0 {
        return Err(ConfigError::MissingSizeLimit("maxBodyLength"));
    }
    let limits = SizeLimits {
        max_request_bytes: Some(max_request_bytes),
        ..descriptor.size_limits().unwrap_or_default()
    };
    Ok(descriptor.with_size_limits(limits))
}

/// Limit the accepted response body. Zero is rejected.
pub fn with_max_response_bytes(
    descriptor: RequestDescriptor,
    max_response_bytes: usize,
) -> Result<RequestDescriptor, ConfigError> {
    if max_response_bytes == 0 {
        return Err(ConfigError::MissingSizeLimit("maxContentLength"));
    }
    let limits = SizeLimits {
        max_response_bytes: Some(max_response_bytes),
        ..descriptor.size_limits().unwrap_or_default()
    };
    Ok(descriptor.with_size_limits(limits))
}

/// Headers identifying the organisation and user a call is made for.
pub fn authorisation_headers(organisation_reference: Option<&str>, user_id: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    if let Some(org) = organisation_reference.filter(|s| !s.is_empty()) {
        headers.insert(ORGANISATION_REFERENCE_HEADER, org);
    }
    if let Some(user) = user_id.filter(|s| !s.is_empty()) {
        headers.insert(USER_ID_HEADER, user);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::correlation::CORRELATION_ID_HEADER;
    use crate::request::descriptor::Method;
    use serde_json::json;

    #[test]
    fn test_build_defaults_content_type() {
        let descriptor = build("https://x/y", None, None, None).unwrap();
        let expected: Headers = [(CONTENT_TYPE, DEFAULT_CONTENT_TYPE)].into_iter().collect();
        assert_eq!(descriptor.headers(), &expected);
        assert!(descriptor.body().is_none());
    }

    #[test]
    fn test_build_keeps_caller_content_type() {
        let headers: Headers = [("content-type", "text/csv")].into_iter().collect();
        let descriptor = build("https://x/y", Some(headers), None, None).unwrap();
        assert_eq!(descriptor.headers().get(CONTENT_TYPE), Some("text/csv"));
        assert_eq!(descriptor.headers().len(), 1);
    }

    #[test]
    fn test_build_defaults_blank_content_type() {
        let headers: Headers = [("content-type", " ")].into_iter().collect();
        let descriptor = build("https://x/y", Some(headers), None, None).unwrap();
        assert_eq!(descriptor.headers().get(CONTENT_TYPE), Some(DEFAULT_CONTENT_TYPE));
        assert_eq!(descriptor.headers().len(), 1);
        assert!(validate(&descriptor.with_method(Method::Get)).is_ok());
    }

    #[test]
    fn test_build_rejects_malformed_header() {
        let headers: Headers = [("Bad Header", "x")].into_iter().collect();
        assert_eq!(
            build("https://x/y", Some(headers), None, None),
            Err(ConfigError::InvalidHeader("Bad Header".into()))
        );
    }

    #[test]
    fn test_validate_rejects_malformed_header() {
        let descriptor = build("https://x/y", None, None, None)
            .unwrap()
            .with_method(Method::Post)
            .with_header("X-Trace", "a\r\nInjected: 1");
        assert_eq!(validate(&descriptor), Err(ConfigError::InvalidHeader("X-Trace".into())));
    }

    #[test]
    fn test_build_rejects_empty_url() {
        assert_eq!(build("", None, None, None), Err(ConfigError::MissingUrl));
        assert_eq!(build("   ", None, None, None), Err(ConfigError::MissingUrl));
    }

    #[test]
    fn test_build_injects_correlation_id() {
        let descriptor = build("https://x/y", None, Some(json!({"a": 1})), Some("req-1")).unwrap();
        assert_eq!(descriptor.headers().get(CORRELATION_ID_HEADER), Some("req-1"));
        assert_eq!(descriptor.body(), Some(&json!({"a": 1})));
    }

    #[test]
    fn test_validate_requires_method() {
        let descriptor = build("https://x/y", None, None, None).unwrap();
        let err = validate(&descriptor).unwrap_err();
        assert_eq!(err, ConfigError::MissingMethod);
        assert!(err.to_string().contains("http method"));
        assert!(validate(&descriptor.with_method(Method::Get)).is_ok());
    }

    #[test]
    fn test_validate_requires_content_type() {
        let descriptor = build("https://x/y", None, None, None)
            .unwrap()
            .with_method(Method::Get)
            .without_header(CONTENT_TYPE);
        assert_eq!(validate(&descriptor), Err(ConfigError::MissingContentType));
    }

    #[test]
    fn test_validate_hand_built_descriptor() {
        let descriptor = RequestDescriptor::new("https://x/y", Headers::new()).with_method(Method::Put);
        assert_eq!(validate(&descriptor), Err(ConfigError::MissingContentType));
    }

    #[test]
    fn test_component_lands_in_metadata() {
        let builder = RequestConfigBuilder::new("licensing-web");
        let descriptor = builder.build("https://x/y", None, None, None).unwrap();
        let metadata = descriptor.logging_metadata().unwrap();
        assert_eq!(metadata.get("component"), Some(&json!("licensing-web")));
        assert!(RequestConfigBuilder::new("").component().is_none());
    }

    #[test]
    fn test_size_limits() {
        let descriptor = build("https://x/y", None, None, None).unwrap();
        assert_eq!(
            with_max_request_bytes(descriptor.clone(), 0),
            Err(ConfigError::MissingSizeLimit("maxBodyLength"))
        );
        let limited = with_max_request_bytes(descriptor, 1024).unwrap();
        let limited = with_max_response_bytes(limited, 2048).unwrap();
        assert_eq!(
            limited.size_limits(),
            Some(SizeLimits { max_request_bytes: Some(1024), max_response_bytes: Some(2048) })
        );
    }

    #[test]
    fn test_authorisation_headers() {
        let headers = authorisation_headers(Some("ORG1"), None);
        assert_eq!(headers.get(ORGANISATION_REFERENCE_HEADER), Some("ORG1"));
        assert!(!headers.contains(USER_ID_HEADER));
        assert!(authorisation_headers(None, Some("")).is_empty());
    }
}

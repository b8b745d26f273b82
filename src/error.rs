//! Error taxonomy for the request pipeline.

use thiserror::Error;

use crate::transport::RawResponse;

/// Status marker logged when the transport never received a status.
pub const NO_RESPONSE: &str = "No Response";

/// A malformed request descriptor or call directive.
///
/// Always fatal to the call and raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Url is required")]
    MissingUrl,

    #[error("Request Config requires a http method")]
    MissingMethod,

    #[error("Request Config requires a content-type header")]
    MissingContentType,

    /// A header name or value that cannot be sent over HTTP.
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// A size limit was requested with a zero value.
    #[error("{0} required")]
    MissingSizeLimit(&'static str),

    #[error("Environment is required")]
    MissingEnvironment,

    #[error("Either success or failure monitoring options are required")]
    EmptyMonitoringDirective,
}

/// A failed transport call.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// No HTTP status was received (DNS, connection refused, size limit).
    #[error("{message}")]
    NoResponse { message: String },

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        message: String,
        response: Box<RawResponse>,
    },
}

impl TransportError {
    pub fn no_response(message: impl Into<String>) -> Self {
        TransportError::NoResponse { message: message.into() }
    }

    /// Status error with the conventional "Request failed with status code N" message.
    pub fn status(response: RawResponse) -> Self {
        TransportError::Status {
            message: format!("Request failed with status code {}", response.status),
            response: Box::new(response),
        }
    }

    /// The response attached to a status failure.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            TransportError::Status { response, .. } => Some(response),
            TransportError::NoResponse { .. } => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// Numeric status as text, or [`NO_RESPONSE`].
    pub fn status_marker(&self) -> String {
        match self.status_code() {
            Some(code) => code.to_string(),
            None => NO_RESPONSE.to_string(),
        }
    }

    pub fn into_response(self) -> Option<RawResponse> {
        match self {
            TransportError::Status { response, .. } => Some(*response),
            TransportError::NoResponse { .. } => None,
        }
    }
}

/// Monitoring was requested but cannot be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitoringConfigError {
    #[error("protective monitoring requested but no monitoring sink is configured")]
    SinkNotConfigured,

    #[error("monitoring sink does not provide a '{0}' channel")]
    MissingChannel(String),
}

/// Raised by a request log sink. Never escapes the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request logging failed: {0}")]
pub struct LoggingFailure(pub String);

/// Errors surfaced to pipeline callers.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    MonitoringConfig(#[from] MonitoringConfigError),
}

impl PipelineError {
    /// The transport failure, if this is one.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            PipelineError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for pipeline calls.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Headers;
    use serde_json::json;

    fn response(status: u16) -> RawResponse {
        RawResponse {
            status,
            headers: Headers::new(),
            data: json!({"error": "bad"}),
        }
    }

    #[test]
    fn test_status_marker() {
        assert_eq!(TransportError::status(response(400)).status_marker(), "400");
        assert_eq!(TransportError::no_response("connect ECONNREFUSED").status_marker(), NO_RESPONSE);
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::status(response(503));
        assert_eq!(err.to_string(), "Request failed with status code 503");

        let err = PipelineError::from(ConfigError::MissingContentType);
        assert_eq!(err.to_string(), "Request Config requires a content-type header");

        let err = MonitoringConfigError::MissingChannel("protective-monitoring".into());
        assert!(err.to_string().contains("protective-monitoring"));
    }

    #[test]
    fn test_into_response() {
        assert_eq!(TransportError::status(response(404)).into_response().map(|r| r.status), Some(404));
        assert!(TransportError::no_response("dns").into_response().is_none());
    }
}

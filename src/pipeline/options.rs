//! Per-call post-processing directives and the normalized result.

use serde::Serialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::monitoring::AuditEventSpec;
use crate::transport::RawResponse;

/// Which audits to emit for a call, and for which environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectiveMonitoring {
    environment: String,
    on_success: Option<AuditEventSpec>,
    on_failure: Option<AuditEventSpec>,
}

impl ProtectiveMonitoring {
    /// Fails without an environment or when neither half is set.
    pub fn new(
        environment: impl Into<String>,
        on_success: Option<AuditEventSpec>,
        on_failure: Option<AuditEventSpec>,
    ) -> Result<Self, ConfigError> {
        let environment = environment.into();
        if environment.trim().is_empty() {
            return Err(ConfigError::MissingEnvironment);
        }
        if on_success.is_none() && on_failure.is_none() {
            return Err(ConfigError::EmptyMonitoringDirective);
        }
        Ok(Self {
            environment,
            on_success,
            on_failure,
        })
    }

    /// Audit successful calls only.
    pub fn on_success(environment: impl Into<String>, spec: AuditEventSpec) -> Result<Self, ConfigError> {
        Self::new(environment, Some(spec), None)
    }

    /// Audit failed calls only.
    pub fn on_failure(environment: impl Into<String>, spec: AuditEventSpec) -> Result<Self, ConfigError> {
        Self::new(environment, None, Some(spec))
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn success_event(&self) -> Option<&AuditEventSpec> {
        self.on_success.as_ref()
    }

    pub fn failure_event(&self) -> Option<&AuditEventSpec> {
        self.on_failure.as_ref()
    }
}

/// How to post-process one call's response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseOptions {
    /// Unwrap 2xx responses to their body.
    pub return_data_only: bool,
    pub protective_monitoring: Option<ProtectiveMonitoring>,
}

impl ResponseOptions {
    pub fn data_only() -> Self {
        Self {
            return_data_only: true,
            protective_monitoring: None,
        }
    }

    pub fn with_monitoring(mut self, monitoring: ProtectiveMonitoring) -> Self {
        self.protective_monitoring = Some(monitoring);
        self
    }

    /// True when either audit half is requested.
    pub fn requests_monitoring(&self) -> bool {
        self.protective_monitoring.is_some()
    }
}

/// The normalized outcome handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// Status, headers and body.
    Envelope(RawResponse),
    /// Body only (data-only mode on a 2xx response).
    Data(Value),
}

impl ApiResponse {
    /// Status of an envelope. Data-only results carry none.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiResponse::Envelope(response) => Some(response.status),
            ApiResponse::Data(_) => None,
        }
    }

    pub fn data(&self) -> &Value {
        match self {
            ApiResponse::Envelope(response) => &response.data,
            ApiResponse::Data(data) => data,
        }
    }

    pub fn into_data(self) -> Value {
        match self {
            ApiResponse::Envelope(response) => response.data,
            ApiResponse::Data(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_monitoring_requires_environment() {
        let spec = AuditEventSpec::new(1u32, "x");
        assert_eq!(
            ProtectiveMonitoring::on_success("  ", spec),
            Err(ConfigError::MissingEnvironment)
        );
    }

    #[test]
    fn test_monitoring_requires_a_half() {
        assert_eq!(
            ProtectiveMonitoring::new("prod", None, None),
            Err(ConfigError::EmptyMonitoringDirective)
        );
    }

    #[test]
    fn test_halves_are_independent() {
        let pm = ProtectiveMonitoring::on_failure("prod", AuditEventSpec::new(2u32, "failed")).unwrap();
        assert!(pm.success_event().is_none());
        assert_eq!(pm.failure_event().map(|s| s.audit_code.0), Some(2));
    }

    #[test]
    fn test_data_only_serializes_bare_body() {
        let result = ApiResponse::Data(json!({"test": "pass"}));
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"test": "pass"}));
        assert_eq!(result.status(), None);
    }
}

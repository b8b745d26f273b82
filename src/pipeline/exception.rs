//! Failure-path post-processing.
//!
//! # Responsibilities
//! - Log every failure exactly once at error severity
//! - Emit the failure audit when the directive asks for one
//! - Apply the configured [`ExceptionPolicy`]
//!
//! # Design Decisions
//! - Propagating is the default; returning the error response is opt-in
//! - No-response failures always propagate: there is no response to return

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult, TransportError};
use crate::logging::RequestLogger;
use crate::monitoring::ProtectiveMonitoringEmitter;
use crate::pipeline::options::{ApiResponse, ResponseOptions};
use crate::pipeline::response::require_monitoring;
use crate::request::RequestDescriptor;

/// What happens to a failed call after it has been logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionPolicy {
    /// Return the transport error to the caller.
    #[default]
    Propagate,
    /// Return the attached error response as a normal result.
    ReturnResponse,
}

#[derive(Debug, Clone)]
pub struct ExceptionProcessor {
    logger: RequestLogger,
    monitoring: Option<ProtectiveMonitoringEmitter>,
    policy: ExceptionPolicy,
}

impl ExceptionProcessor {
    pub fn new(
        logger: RequestLogger,
        monitoring: Option<ProtectiveMonitoringEmitter>,
        policy: ExceptionPolicy,
    ) -> Self {
        Self {
            logger,
            monitoring,
            policy,
        }
    }

    pub fn policy(&self) -> ExceptionPolicy {
        self.policy
    }

    pub fn process(
        &self,
        error: TransportError,
        descriptor: &RequestDescriptor,
        options: &ResponseOptions,
    ) -> PipelineResult<ApiResponse> {
        self.logger.log_error(descriptor, &error);

        require_monitoring(self.monitoring.as_ref(), options)?;
        if let (Some(emitter), Some(pm)) = (&self.monitoring, &options.protective_monitoring) {
            if let Some(spec) = pm.failure_event() {
                emitter.emit_failure(pm.environment(), spec);
            }
        }

        match (self.policy, error) {
            (ExceptionPolicy::ReturnResponse, TransportError::Status { response, .. }) => {
                tracing::debug!(status = response.status, "Returning error response to caller");
                Ok(ApiResponse::Envelope(*response))
            }
            (_, error) => Err(PipelineError::Transport(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TracingRequestLog;
    use crate::request::{build, Method};
    use crate::transport::RawResponse;
    use serde_json::json;
    use std::sync::Arc;

    fn processor(policy: ExceptionPolicy) -> ExceptionProcessor {
        ExceptionProcessor::new(RequestLogger::new(Arc::new(TracingRequestLog)), None, policy)
    }

    fn descriptor() -> RequestDescriptor {
        build("https://svc/api/1", None, None, None).unwrap().with_method(Method::Get)
    }

    #[test]
    fn test_propagate_is_default() {
        assert_eq!(ExceptionPolicy::default(), ExceptionPolicy::Propagate);
        let err = processor(ExceptionPolicy::Propagate)
            .process(
                TransportError::status(RawResponse::new(400, json!({}))),
                &descriptor(),
                &ResponseOptions::default(),
            )
            .unwrap_err();
        assert_eq!(err.transport().and_then(|e| e.status_code()), Some(400));
    }

    #[test]
    fn test_return_response_policy() {
        let result = processor(ExceptionPolicy::ReturnResponse)
            .process(
                TransportError::status(RawResponse::new(400, json!({"test": "pass"}))),
                &descriptor(),
                &ResponseOptions::default(),
            )
            .unwrap();
        assert_eq!(result.status(), Some(400));
        assert_eq!(result.data(), &json!({"test": "pass"}));
    }

    #[test]
    fn test_no_response_always_propagates() {
        let err = processor(ExceptionPolicy::ReturnResponse)
            .process(TransportError::no_response("refused"), &descriptor(), &ResponseOptions::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Transport(TransportError::NoResponse { .. })));
    }
}

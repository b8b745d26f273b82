//! Success-path post-processing.
//!
//! # Responsibilities
//! - Emit the success audit when the directive asks for one
//! - Unwrap 2xx responses in data-only mode
//!
//! # Design Decisions
//! - Non-2xx responses stay enveloped even in data-only mode
//! - A requested audit without an emitter is an error, never skipped

use crate::error::MonitoringConfigError;
use crate::monitoring::ProtectiveMonitoringEmitter;
use crate::pipeline::options::{ApiResponse, ResponseOptions};
use crate::transport::RawResponse;

/// Fail when `options` asks for monitoring that `emitter` cannot deliver.
pub fn require_monitoring(
    emitter: Option<&ProtectiveMonitoringEmitter>,
    options: &ResponseOptions,
) -> Result<(), MonitoringConfigError> {
    if options.requests_monitoring() && emitter.is_none() {
        return Err(MonitoringConfigError::SinkNotConfigured);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ResponseProcessor {
    monitoring: Option<ProtectiveMonitoringEmitter>,
}

impl ResponseProcessor {
    pub fn new(monitoring: Option<ProtectiveMonitoringEmitter>) -> Self {
        Self { monitoring }
    }

    pub fn process(
        &self,
        response: RawResponse,
        options: &ResponseOptions,
    ) -> Result<ApiResponse, MonitoringConfigError> {
        require_monitoring(self.monitoring.as_ref(), options)?;

        if let (Some(emitter), Some(pm)) = (&self.monitoring, &options.protective_monitoring) {
            if let Some(spec) = pm.success_event() {
                emitter.emit_success(pm.environment(), spec);
            }
        }

        if options.return_data_only && response.is_success() {
            return Ok(ApiResponse::Data(response.data));
        }
        Ok(ApiResponse::Envelope(response))
    }
}

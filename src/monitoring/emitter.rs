//! Protective monitoring emitter.
//!
//! # Responsibilities
//! - Build the fixed-shape audit record for a call outcome
//! - Serialize it to one line and hand it to the audit channel
//!
//! # Design Decisions
//! - Success and failure emission are independent
//! - The channel is resolved once, at construction

use std::sync::Arc;

use crate::error::MonitoringConfigError;
use crate::monitoring::event::{AuditEventSpec, AuditRecord};
use crate::monitoring::sink::{AuditChannel, MonitoringSink, PROTECTIVE_MONITORING_CHANNEL};
use crate::observability::metrics;

/// Emits audit records to a monitoring channel.
#[derive(Clone)]
pub struct ProtectiveMonitoringEmitter {
    channel: Arc<dyn AuditChannel>,
}

impl ProtectiveMonitoringEmitter {
    /// Resolve `channel_name` on `sink`. A missing channel is an error.
    pub fn new(sink: &dyn MonitoringSink, channel_name: &str) -> Result<Self, MonitoringConfigError> {
        let channel = sink
            .channel(channel_name)
            .ok_or_else(|| MonitoringConfigError::MissingChannel(channel_name.to_string()))?;
        Ok(Self { channel })
    }

    /// Use the default `protective-monitoring` channel.
    pub fn with_default_channel(sink: &dyn MonitoringSink) -> Result<Self, MonitoringConfigError> {
        Self::new(sink, PROTECTIVE_MONITORING_CHANNEL)
    }

    /// Emit an information-level audit record.
    pub fn emit_success(&self, environment: &str, spec: &AuditEventSpec) {
        let line = AuditRecord::new(environment, spec).to_line();
        self.channel.info(&line);
        metrics::record_audit_event("success");
    }

    /// Emit an error-level audit record.
    pub fn emit_failure(&self, environment: &str, spec: &AuditEventSpec) {
        let line = AuditRecord::new(environment, spec).to_line();
        self.channel.error(&line);
        metrics::record_audit_event("failure");
    }
}

impl std::fmt::Debug for ProtectiveMonitoringEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtectiveMonitoringEmitter").finish_non_exhaustive()
    }
}

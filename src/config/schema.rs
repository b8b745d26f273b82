//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::monitoring::PROTECTIVE_MONITORING_CHANNEL;
use crate::pipeline::ExceptionPolicy;

/// Root configuration for a pipeline instance.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Identity of the calling service.
    pub service: ServiceConfig,

    /// HTTP client settings.
    pub transport: TransportConfig,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// Protective monitoring settings.
    pub monitoring: MonitoringConfig,

    /// What happens to failed calls after logging.
    pub exception_policy: ExceptionPolicy,
}

/// Identity of the calling service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Component identifier recorded on every request's log metadata.
    pub component_name: String,

    /// Environment name written into audit records (e.g. "prod").
    pub environment: String,
}

/// HTTP client settings. Timeouts belong to the transport, not the pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Protective monitoring settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Attach a monitoring emitter to the pipeline.
    pub enabled: bool,

    /// Sink channel receiving audit records.
    pub channel: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            channel: PROTECTIVE_MONITORING_CHANNEL.to_string(),
        }
    }
}

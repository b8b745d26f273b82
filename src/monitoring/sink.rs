//! Monitoring sink capability.
//!
//! The sink is log-line oriented: records arrive already serialized.

use std::sync::Arc;

/// Default channel name for protective monitoring records.
pub const PROTECTIVE_MONITORING_CHANNEL: &str = "protective-monitoring";

/// A named, line-oriented audit output.
pub trait AuditChannel: Send + Sync {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

/// Provides audit channels by name.
pub trait MonitoringSink: Send + Sync {
    /// Look up a channel. `None` when the sink has no such channel.
    fn channel(&self, name: &str) -> Option<Arc<dyn AuditChannel>>;
}

/// Sink that writes every channel to `tracing` under the
/// `protective_monitoring` target.
#[derive(Debug, Clone, Default)]
pub struct TracingMonitoringSink {
    channels: Option<Vec<String>>,
}

impl TracingMonitoringSink {
    /// Sink serving any channel name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink serving only the listed channels.
    pub fn with_channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channels: Some(channels.into_iter().map(Into::into).collect()),
        }
    }
}

impl MonitoringSink for TracingMonitoringSink {
    fn channel(&self, name: &str) -> Option<Arc<dyn AuditChannel>> {
        let known = match &self.channels {
            Some(channels) => channels.iter().any(|c| c == name),
            None => true,
        };
        known.then(|| Arc::new(TracingAuditChannel { name: name.to_string() }) as Arc<dyn AuditChannel>)
    }
}

#[derive(Debug)]
struct TracingAuditChannel {
    name: String,
}

impl AuditChannel for TracingAuditChannel {
    fn info(&self, line: &str) {
        tracing::info!(target: "protective_monitoring", channel = %self.name, "{}", line);
    }

    fn error(&self, line: &str) {
        tracing::error!(target: "protective_monitoring", channel = %self.name, "{}", line);
    }
}

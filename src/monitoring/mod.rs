//! Protective monitoring (security audit) subsystem.
//!
//! # Data Flow
//! ```text
//! ResponseOptions.protective_monitoring
//!     → on success: emitter.emit_success (channel info)
//!     → on failure: emitter.emit_failure (channel error)
//!     → event.rs builds AuditRecord {Environment, AuditCode, ...}
//!     → serialized JSON line → MonitoringSink channel
//! ```
//!
//! # Design Decisions
//! - Independent of operational request logging
//! - Record field names and casing are fixed by the downstream audit sink

pub mod emitter;
pub mod event;
pub mod sink;

pub use emitter::ProtectiveMonitoringEmitter;
pub use event::{AuditCode, AuditEventSpec, AuditRecord, PmcCode, Priority};
pub use sink::{AuditChannel, MonitoringSink, TracingMonitoringSink, PROTECTIVE_MONITORING_CHANNEL};

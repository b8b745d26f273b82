//! Request logging subsystem.
//!
//! # Data Flow
//! ```text
//! RequestDescriptor
//!     → classify.rs (health-check / resource / standard)
//!     → logger.rs (begin, end or error event; severity selection)
//!     → sink.rs (RequestLog trait: debug / info / error)
//!     → TracingRequestLog (default) or a host-provided sink
//! ```
//!
//! # Design Decisions
//! - Health checks and static resources are logged at debug
//! - A failing sink never changes the outcome of the call

pub mod classify;
pub mod logger;
pub mod sink;

/// Free-form observability properties attached to log events.
pub type LogProperties = serde_json::Map<String, serde_json::Value>;

pub use classify::{classify, RequestKind, Severity};
pub use logger::RequestLogger;
pub use sink::{RequestLog, RequestLogEntry, TracingRequestLog};

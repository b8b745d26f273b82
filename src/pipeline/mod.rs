//! Request pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! RequestDescriptor + ResponseOptions
//!     → service.rs (verb stamps method, monitoring precondition)
//!     → invoker.rs (validate → log begin → transport, once)
//!     → Completed: response.rs (success audit, data-only unwrap) → log end
//!     → Failed:    exception.rs (log error, failure audit, ExceptionPolicy)
//!     → ApiResponse or PipelineError
//! ```
//!
//! # Design Decisions
//! - Exactly one begin log and one terminal log per dispatched call
//! - Override points are configuration values, not subclass hooks
//! - The pipeline only suspends at the transport call

pub mod exception;
pub mod invoker;
pub mod options;
pub mod response;
pub mod service;

pub use exception::{ExceptionPolicy, ExceptionProcessor};
pub use invoker::{Dispatch, HttpInvoker};
pub use options::{ApiResponse, ProtectiveMonitoring, ResponseOptions};
pub use response::ResponseProcessor;
pub use service::{ApiService, HEALTH_PING_PATH};

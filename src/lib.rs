//! Shared request-orchestration layer for calling HTTP APIs.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller
//!     │  build(url, headers, body, correlation id)
//!     ▼
//!  ┌─────────┐   ┌──────────────────────────────────────────────────────┐
//!  │ request │──▶│                    ApiService                        │
//!  └─────────┘   │                                                      │
//!                │  validate → log begin → Transport::send (once)       │
//!                │                 │                                    │
//!                │        ┌────────┴─────────┐                          │
//!                │        ▼                  ▼                          │
//!                │  ResponseProcessor   ExceptionProcessor              │
//!                │  (audit, data-only)  (log error, audit, policy)      │
//!                │        │                  │                          │
//!                │        ▼                  ▼                          │
//!                │     log end          propagate / return              │
//!                └──────────────────────────────────────────────────────┘
//!
//!   Cross-cutting: logging (RequestLog sink), monitoring (audit sink),
//!                  observability (tracing + metrics), config (TOML)
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod monitoring;
pub mod observability;
pub mod pipeline;
pub mod request;
pub mod transport;

pub use config::PipelineConfig;
pub use error::{ConfigError, MonitoringConfigError, PipelineError, PipelineResult, TransportError};
pub use pipeline::{ApiResponse, ApiService, ExceptionPolicy, ProtectiveMonitoring, ResponseOptions};
pub use request::{build, validate, RequestDescriptor};
pub use transport::{RawResponse, ReqwestTransport, Transport};

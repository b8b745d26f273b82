//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline calls produce:
//!     → logging.rs (subscriber setup for structured log events)
//!     → metrics.rs (request counters and latency histograms)
//!     → tracing.rs (one span per call carrying the correlation ID)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Correlation ID flows through every span and log event
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
pub mod tracing;

//! Request construction subsystem.
//!
//! # Data Flow
//! ```text
//! caller (url, headers, body, correlation id)
//!     → builder.rs (defaults, correlation injection)
//!     → descriptor.rs (RequestDescriptor value)
//!     → verb stamps the method (new descriptor, no in-place mutation)
//!     → builder::validate immediately before the transport call
//! ```
//!
//! # Design Decisions
//! - Building never touches the network or process environment
//! - The correlation header name is fixed for every service

pub mod builder;
pub mod correlation;
pub mod descriptor;

pub use builder::{build, validate, RequestConfigBuilder};
pub use correlation::CORRELATION_ID_HEADER;
pub use descriptor::{Headers, Method, RequestDescriptor, SizeLimits};

//! Transport invocation.
//!
//! # Responsibilities
//! - Validate the descriptor immediately before dispatch
//! - Log the begin event
//! - Call the transport exactly once and classify the outcome
//! - Record request metrics

use std::time::Instant;

use crate::error::{ConfigError, TransportError};
use crate::logging::{classify, RequestLogger};
use crate::observability::metrics;
use crate::request::{builder, RequestDescriptor};
use crate::transport::{RawResponse, Transport};

/// Outcome of a dispatched call.
#[derive(Debug)]
pub enum Dispatch {
    /// The transport completed with a 2xx/3xx status.
    Completed(RawResponse),
    /// The transport failed, with or without a response.
    Failed(TransportError),
}

#[derive(Debug)]
pub struct HttpInvoker<T> {
    transport: T,
    logger: RequestLogger,
}

impl<T: Transport> HttpInvoker<T> {
    pub fn new(transport: T, logger: RequestLogger) -> Self {
        Self { transport, logger }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, log "begin" and send.
    ///
    /// A config error returns before anything is logged or sent. Once this
    /// returns a [`Dispatch`], the caller owes exactly one terminal log.
    pub async fn invoke(&self, descriptor: &RequestDescriptor) -> Result<Dispatch, ConfigError> {
        builder::validate(descriptor)?;
        self.logger.log_begin(descriptor);

        let start = Instant::now();
        let outcome = self.transport.send(descriptor).await;

        let method = descriptor.method().map(|m| m.as_str()).unwrap_or("-");
        let kind = classify(descriptor.url());
        Ok(match outcome {
            Ok(response) => {
                metrics::record_request(method, &response.status.to_string(), kind, start);
                Dispatch::Completed(response)
            }
            Err(error) => {
                metrics::record_request(method, &error.status_marker(), kind, start);
                Dispatch::Failed(error)
            }
        })
    }
}

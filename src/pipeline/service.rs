//! The composed request pipeline.
//!
//! # Responsibilities
//! - Stamp the verb onto a new descriptor
//! - Validate it, then refuse monitoring directives that cannot be delivered
//! - Run invoker → response or exception processing → terminal log
//!
//! # Design Decisions
//! - One pipeline type; behavior variants are values (`ExceptionPolicy`)
//! - Holds no per-call state, so one instance serves concurrent calls

use std::sync::Arc;

use tracing::Instrument;

use crate::config::PipelineConfig;
use crate::error::{MonitoringConfigError, PipelineResult};
use crate::logging::{RequestLog, RequestLogger};
use crate::monitoring::{MonitoringSink, ProtectiveMonitoringEmitter};
use crate::observability::tracing::request_span;
use crate::pipeline::exception::{ExceptionPolicy, ExceptionProcessor};
use crate::pipeline::invoker::{Dispatch, HttpInvoker};
use crate::pipeline::options::{ApiResponse, ResponseOptions};
use crate::pipeline::response::{require_monitoring, ResponseProcessor};
use crate::request::{build, builder, Method, RequestDescriptor};
use crate::transport::Transport;

/// Path appended to a service base url for liveness pings.
pub const HEALTH_PING_PATH: &str = "/health/Ping";

/// Calls HTTP APIs through the standard pipeline.
#[derive(Debug)]
pub struct ApiService<T> {
    invoker: HttpInvoker<T>,
    logger: RequestLogger,
    monitoring: Option<ProtectiveMonitoringEmitter>,
    responses: ResponseProcessor,
    exceptions: ExceptionProcessor,
}

impl<T: Transport> ApiService<T> {
    /// Pipeline without monitoring, propagating failures.
    pub fn new(transport: T, log: Arc<dyn RequestLog>) -> Self {
        let logger = RequestLogger::new(log);
        Self {
            invoker: HttpInvoker::new(transport, logger.clone()),
            exceptions: ExceptionProcessor::new(logger.clone(), None, ExceptionPolicy::default()),
            responses: ResponseProcessor::default(),
            logger,
            monitoring: None,
        }
    }

    /// Build from config. A sink is required when monitoring is enabled.
    pub fn from_config(
        config: &PipelineConfig,
        transport: T,
        log: Arc<dyn RequestLog>,
        sink: Option<&dyn MonitoringSink>,
    ) -> Result<Self, MonitoringConfigError> {
        let service = Self::new(transport, log).with_policy(config.exception_policy);
        if !config.monitoring.enabled {
            return Ok(service);
        }
        let sink = sink.ok_or(MonitoringConfigError::SinkNotConfigured)?;
        let emitter = ProtectiveMonitoringEmitter::new(sink, &config.monitoring.channel)?;
        Ok(service.with_monitoring(emitter))
    }

    pub fn with_monitoring(mut self, emitter: ProtectiveMonitoringEmitter) -> Self {
        self.monitoring = Some(emitter);
        let policy = self.policy();
        self.rebuild_processors(policy)
    }

    pub fn with_policy(self, policy: ExceptionPolicy) -> Self {
        self.rebuild_processors(policy)
    }

    fn rebuild_processors(mut self, policy: ExceptionPolicy) -> Self {
        self.responses = ResponseProcessor::new(self.monitoring.clone());
        self.exceptions = ExceptionProcessor::new(self.logger.clone(), self.monitoring.clone(), policy);
        self
    }

    pub fn policy(&self) -> ExceptionPolicy {
        self.exceptions.policy()
    }

    pub fn transport(&self) -> &T {
        self.invoker.transport()
    }

    pub async fn get(&self, request: RequestDescriptor, options: &ResponseOptions) -> PipelineResult<ApiResponse> {
        self.execute(Method::Get, request, options).await
    }

    pub async fn post(&self, request: RequestDescriptor, options: &ResponseOptions) -> PipelineResult<ApiResponse> {
        self.execute(Method::Post, request, options).await
    }

    pub async fn put(&self, request: RequestDescriptor, options: &ResponseOptions) -> PipelineResult<ApiResponse> {
        self.execute(Method::Put, request, options).await
    }

    pub async fn patch(&self, request: RequestDescriptor, options: &ResponseOptions) -> PipelineResult<ApiResponse> {
        self.execute(Method::Patch, request, options).await
    }

    pub async fn delete(&self, request: RequestDescriptor, options: &ResponseOptions) -> PipelineResult<ApiResponse> {
        self.execute(Method::Delete, request, options).await
    }

    pub async fn head(&self, request: RequestDescriptor, options: &ResponseOptions) -> PipelineResult<ApiResponse> {
        self.execute(Method::Head, request, options).await
    }

    /// GET `{base_url}/health/Ping`.
    pub async fn health_ping(&self, base_url: &str, correlation_id: Option<&str>) -> PipelineResult<ApiResponse> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), HEALTH_PING_PATH);
        let request = build(&url, None, None, correlation_id)?;
        self.get(request, &ResponseOptions::default()).await
    }

    /// Run one call through the pipeline.
    pub async fn execute(
        &self,
        method: Method,
        request: RequestDescriptor,
        options: &ResponseOptions,
    ) -> PipelineResult<ApiResponse> {
        let mut descriptor = request.with_method(method);
        if !method.carries_body() && descriptor.body().is_some() {
            tracing::debug!(method = %method, "Dropping request body");
            descriptor = descriptor.without_body();
        }

        let span = request_span(&descriptor);
        let result: PipelineResult<ApiResponse> = async move {
            builder::validate(&descriptor)?;
            require_monitoring(self.monitoring.as_ref(), options)?;

            match self.invoker.invoke(&descriptor).await? {
                Dispatch::Completed(response) => {
                    let status = response.status;
                    let result = self.responses.process(response, options);
                    self.logger.log_end(&descriptor, status);
                    Ok(result?)
                }
                Dispatch::Failed(error) => self.exceptions.process(error, &descriptor, options),
            }
        }
        .instrument(span)
        .await;
        result
    }
}

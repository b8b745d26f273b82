//! Transport backed by a `reqwest` client.
//!
//! # Responsibilities
//! - Map descriptors onto reqwest requests
//! - Enforce client-side size limits, streaming the response body
//! - Classify failures into no-response and status errors

use std::time::Duration;

use reqwest::header::CONTENT_TYPE as CONTENT_TYPE_HEADER;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::request::{Headers, Method, RequestDescriptor};
use crate::transport::{decode_body, is_completed_status, RawResponse, Transport};

/// HTTP transport using a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with the configured timeouts.
    pub fn from_config(config: &TransportConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self::new(builder.build()?))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
    }
}

/// Serialize a body: JSON content types get JSON, bare strings go out as text.
fn encode_body(body: &Value, content_type: Option<&str>) -> Result<Vec<u8>, TransportError> {
    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(true);
    match body {
        Value::String(text) if !is_json => Ok(text.clone().into_bytes()),
        other => serde_json::to_vec(other)
            .map_err(|e| TransportError::no_response(format!("Failed to serialize request body: {}", e))),
    }
}

/// Read a response body, giving up once it passes `max` bytes.
///
/// Returns `Ok(None)` when the limit is exceeded. A declared
/// `Content-Length` over the limit is refused before any chunk is read.
async fn read_limited(
    mut response: Response,
    max: Option<usize>,
) -> Result<Option<Vec<u8>>, reqwest::Error> {
    let Some(max) = max else {
        return Ok(Some(response.bytes().await?.to_vec()));
    };
    if response.content_length().is_some_and(|len| len > max as u64) {
        return Ok(None);
    }

    let mut buf = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if buf.len() + chunk.len() > max {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Some(buf))
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let method = request
            .method()
            .ok_or_else(|| TransportError::no_response("Request has no http method"))?;
        let limits = request.size_limits().unwrap_or_default();
        let header_map = request
            .headers()
            .to_header_map()
            .map_err(|e| TransportError::no_response(e.to_string()))?;

        let mut builder = self
            .client
            .request(to_reqwest_method(method), request.url())
            .headers(header_map);

        if let Some(body) = request.body().filter(|_| method.carries_body()) {
            let bytes = encode_body(body, request.headers().get(CONTENT_TYPE_HEADER.as_str()))?;
            if let Some(max) = limits.max_request_bytes {
                if bytes.len() > max {
                    return Err(TransportError::no_response(
                        "Request body larger than maxBodyLength limit",
                    ));
                }
            }
            builder = builder.body(bytes);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::no_response(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = Headers::from(response.headers());

        let body = read_limited(response, limits.max_response_bytes)
            .await
            .map_err(|e| TransportError::no_response(e.to_string()))?;

        let data = match body {
            Some(bytes) => decode_body(&bytes),
            // A failure status is still reported as such, without its body.
            None if !is_completed_status(status) => {
                tracing::debug!(status, "Dropping error body over maxContentLength");
                Value::Null
            }
            None => {
                return Err(TransportError::no_response(format!(
                    "maxContentLength size of {} exceeded",
                    limits.max_response_bytes.unwrap_or_default()
                )));
            }
        };

        let raw = RawResponse { status, headers, data };
        if is_completed_status(status) {
            Ok(raw)
        } else {
            Err(TransportError::status(raw))
        }
    }
}

//! The request descriptor that flows through the pipeline.
//!
//! # Design Decisions
//! - Descriptors are values: every change produces a new descriptor
//! - Header lookup is case-insensitive; names and values must convert to a
//!   `reqwest` `HeaderMap` before dispatch
//! - Logging metadata travels with the descriptor but is never sent

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::logging::LogProperties;

/// HTTP methods the pipeline dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }

    /// Whether a payload is sent for this method.
    pub fn carries_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            other => Err(format!("unsupported http method '{}'", other)),
        }
    }
}

/// Ordered header list with case-insensitive lookup.
///
/// Entries are only checked against HTTP header syntax when converted with
/// [`Headers::to_header_map`], so a malformed caller header surfaces as a
/// [`ConfigError`] rather than a transport failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the first value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name`, replacing an existing entry in place (keeps its position).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Set `name` only if no entry exists yet. Returns true if inserted.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push((name, value.into()));
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a wire header map, rejecting names or values that are not
    /// valid HTTP.
    pub fn to_header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut map = HeaderMap::with_capacity(self.0.len());
        for (name, value) in &self.0 {
            let invalid = || ConfigError::InvalidHeader(name.clone());
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

impl From<&HeaderMap> for Headers {
    /// Values that are not visible ASCII are skipped.
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

/// Client-side payload limits for large uploads/downloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    /// Maximum serialized request body in bytes.
    pub max_request_bytes: Option<usize>,
    /// Maximum response body in bytes.
    pub max_response_bytes: Option<usize>,
}

/// A single outgoing request.
///
/// Built by [`crate::request::builder::build`] (or by hand), stamped with a
/// method by the calling verb and validated immediately before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Option<Method>,
    url: String,
    headers: Headers,
    body: Option<Value>,
    size_limits: Option<SizeLimits>,
    logging_metadata: Option<LogProperties>,
}

impl RequestDescriptor {
    /// Hand-build a descriptor. No defaults are applied; use the builder for that.
    pub fn new(url: impl Into<String>, headers: Headers) -> Self {
        Self {
            method: None,
            url: url.into(),
            headers,
            body: None,
            size_limits: None,
            logging_metadata: None,
        }
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn size_limits(&self) -> Option<SizeLimits> {
        self.size_limits
    }

    pub fn logging_metadata(&self) -> Option<&LogProperties> {
        self.logging_metadata.as_ref()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn without_header(mut self, name: &str) -> Self {
        self.headers.remove(name);
        self
    }

    pub fn with_size_limits(mut self, limits: SizeLimits) -> Self {
        self.size_limits = Some(limits);
        self
    }

    pub fn with_logging_metadata(mut self, metadata: LogProperties) -> Self {
        self.logging_metadata = Some(metadata);
        self
    }

    /// Merge a single metadata entry, creating the bag if needed.
    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.logging_metadata
            .get_or_insert_with(LogProperties::new)
            .insert(key.into(), value.into());
        self
    }
}

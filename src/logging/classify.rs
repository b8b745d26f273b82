//! Request classification for log severity.
//!
//! # Responsibilities
//! - Detect health-check requests (path contains `health/`)
//! - Detect static resource requests (`/assets/` or `/static/`, any case)
//! - Map a classification onto begin/end severity
//!
//! # Design Decisions
//! - Fixed conventions, not configurable per call
//! - Substring checks, no regex
//! - Absolute urls are reduced to their path; relative urls are used as-is

use url::Url;

/// Log severity chosen for a request event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Debug,
    Info,
    Error,
}

/// What kind of request a url represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    HealthCheck,
    Resource,
    Standard,
}

impl RequestKind {
    /// Severity for begin/end events. Failures always log at error.
    pub fn lifecycle_severity(&self) -> Severity {
        match self {
            RequestKind::HealthCheck | RequestKind::Resource => Severity::Debug,
            RequestKind::Standard => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::HealthCheck => "health_check",
            RequestKind::Resource => "resource",
            RequestKind::Standard => "standard",
        }
    }
}

fn path_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    }
}

pub fn is_health_url(url: &str) -> bool {
    path_of(url).contains("health/")
}

pub fn is_resource_url(url: &str) -> bool {
    let path = path_of(url).to_ascii_lowercase();
    path.contains("/assets/") || path.contains("/static/")
}

/// Classify a request url.
pub fn classify(url: &str) -> RequestKind {
    if is_health_url(url) {
        RequestKind::HealthCheck
    } else if is_resource_url(url) {
        RequestKind::Resource
    } else {
        RequestKind::Standard
    }
}

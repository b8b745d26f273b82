//! Audit event definitions and the wire record.
//!
//! Audit code ranges:
//! - 0 - 999: common codes
//! - 10,000 - 99,999: foundation service codes
//! - 100,000 - 199,999: application codes (CRM 100,000+, Licensing 101,000+)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric audit code understood by the audit sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditCode(pub u32);

impl AuditCode {
    pub const LICENSING_SUBMISSION_FAILURE: AuditCode = AuditCode(101_000);
}

impl From<u32> for AuditCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// Protective monitoring control codes.
pub struct PmcCode;

impl PmcCode {
    pub const BUSINESS_TRANSACTIONS: &'static str = "PMC-07-06-AB";
}

/// Audit event priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Normal,
    Unexpected,
    Exception,
}

/// What to audit for one call outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEventSpec {
    pub audit_code: AuditCode,
    pub audit_description: String,
    /// Free-form details (`PMCDetails`).
    pub details: Option<Value>,
    pub pmc_type: Option<String>,
    /// Classification code (`PMCCode`).
    pub pmc_code: Option<String>,
    pub priority: Option<Priority>,
}

impl AuditEventSpec {
    pub fn new(audit_code: impl Into<AuditCode>, audit_description: impl Into<String>) -> Self {
        Self {
            audit_code: audit_code.into(),
            audit_description: audit_description.into(),
            details: None,
            pmc_type: None,
            pmc_code: None,
            priority: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_pmc_type(mut self, pmc_type: impl Into<String>) -> Self {
        self.pmc_type = Some(pmc_type.into());
        self
    }

    pub fn with_pmc_code(mut self, pmc_code: impl Into<String>) -> Self {
        self.pmc_code = Some(pmc_code.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// The audit record as the sink expects it. Field names are a wire contract.
#[derive(Debug, Serialize)]
pub struct AuditRecord<'a> {
    #[serde(rename = "Environment")]
    pub environment: &'a str,
    #[serde(rename = "AuditCode")]
    pub audit_code: AuditCode,
    #[serde(rename = "AuditDescription")]
    pub audit_description: &'a str,
    #[serde(rename = "PMCDetails", skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a Value>,
    #[serde(rename = "PMCType", skip_serializing_if = "Option::is_none")]
    pub pmc_type: Option<&'a str>,
    #[serde(rename = "PMCCode", skip_serializing_if = "Option::is_none")]
    pub pmc_code: Option<&'a str>,
    #[serde(rename = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl<'a> AuditRecord<'a> {
    pub fn new(environment: &'a str, spec: &'a AuditEventSpec) -> Self {
        Self {
            environment,
            audit_code: spec.audit_code,
            audit_description: &spec.audit_description,
            details: spec.details.as_ref().filter(|d| !d.is_null()),
            pmc_type: spec.pmc_type.as_deref(),
            pmc_code: spec.pmc_code.as_deref(),
            priority: spec.priority,
        }
    }

    /// Render as a single JSON line. Never fails.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Audit record serialization failed, sending minimal record");
            serde_json::json!({
                "Environment": self.environment,
                "AuditCode": self.audit_code.0,
                "AuditDescription": self.audit_description,
            })
            .to_string()
        })
    }
}

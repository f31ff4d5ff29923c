//! Fault translation: mapping error descriptors to SOAP-style fault trees.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fmt;

/// Fault code used for server-side failures (status >= 500).
pub const INTERNAL_ERROR_CODE: &str = "INTERNAL_ERROR";

/// Fault code used for client-side failures.
pub const CLIENT_ERROR_CODE: &str = "BAD_REQUEST";

/// HTTP status assumed when a descriptor carries none.
pub const DEFAULT_FAULT_STATUS: u16 = 500;

/// A generic error to be rendered as an XML fault.
///
/// Constructed ad hoc by the caller or the boundary layer at the moment a
/// failure must be rendered; consumed once by the translator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Application-level error code. Takes precedence over the
    /// status-derived code when present.
    pub code: Option<String>,
    /// HTTP-status-like code; defaults to 500 when absent.
    pub status_code: Option<u16>,
    /// Human-readable message, rendered in the fault reason branch.
    pub message: String,
}

impl ErrorDescriptor {
    /// Create a descriptor with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            status_code: None,
            message: message.into(),
        }
    }

    /// Attach an explicit error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach an HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// The effective status code.
    pub fn status(&self) -> u16 {
        self.status_code.unwrap_or(DEFAULT_FAULT_STATUS)
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status())
    }
}

/// Translates an error descriptor into a fault tree.
///
/// The default implementation is a reference, not a requirement: engines
/// accept any replacement with the same contract.
pub trait FaultTranslator: fmt::Debug + Send + Sync {
    /// Build the fault tree for the given error.
    fn translate(&self, error: &ErrorDescriptor) -> JsonValue;
}

/// The default SOAP 1.2 fault translator.
///
/// Produces a two-branch fault:
///
/// ```json
/// {
///   "env:Fault": {
///     "env:Code": { "env:Value": "BAD_REQUEST" },
///     "env:Reason": { "env:Text": "URL path not found" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFaultTranslator;

impl FaultTranslator for DefaultFaultTranslator {
    fn translate(&self, error: &ErrorDescriptor) -> JsonValue {
        let code = match &error.code {
            Some(code) => code.clone(),
            None if error.status() >= 500 => INTERNAL_ERROR_CODE.to_string(),
            None => CLIENT_ERROR_CODE.to_string(),
        };

        json!({
            "env:Fault": {
                "env:Code": { "env:Value": code },
                "env:Reason": { "env:Text": error.message.as_str() },
            }
        })
    }
}

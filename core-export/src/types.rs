//! Request and response types of the export protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied parameters of a create-target call.
///
/// Absent and empty fields both fall back to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub name: Option<String>,
    pub mime_type: Option<String>,
}

impl ExportRequest {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            mime_type: Some(mime_type.into()),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            mime_type: None,
        }
    }

    pub(crate) fn resolve(&self, default_name: &str, default_mime_type: &str) -> (String, String) {
        (
            non_empty_or(self.name.as_deref(), default_name),
            non_empty_or(self.mime_type.as_deref(), default_mime_type),
        )
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Locator of a user-approved writable document.
///
/// Only ever produced from a picker result that carried a locator; the
/// string is kept exactly as the host reported it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetHandle(String);

impl TargetHandle {
    pub(crate) fn from_locator(locator: &str) -> Self {
        Self(locator.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Caller-supplied parameters of a write-target call.
///
/// Both fields stay optional at this boundary so that an absent payload can
/// be told apart from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub handle: Option<String>,
    pub payload: Option<String>,
}

impl WriteRequest {
    /// Write `payload` to a handle returned by a previous create-target call.
    pub fn new(handle: &TargetHandle, payload: impl Into<String>) -> Self {
        Self {
            handle: Some(handle.as_str().to_string()),
            payload: Some(payload.into()),
        }
    }

    /// Build a request from raw host arguments.
    pub fn from_parts(handle: Option<String>, payload: Option<String>) -> Self {
        Self { handle, payload }
    }
}

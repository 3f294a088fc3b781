use bridge_traits::BridgeError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Closed set of outcomes an export call can be rejected with.
///
/// Every variant is terminal; nothing in the core retries.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Document picker returned no selection")]
    Canceled,

    #[error("No target locator was supplied")]
    MissingUri,

    #[error("No payload was supplied")]
    MissingData,

    #[error("Could not open target for writing: {source}")]
    FileNotCreated {
        #[source]
        source: BridgeError,
    },

    #[error("Writing to target failed: {source}")]
    WriteFailed {
        #[source]
        source: BridgeError,
    },
}

impl ExportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::Canceled => ErrorCode::Canceled,
            ExportError::MissingUri => ErrorCode::MissingUri,
            ExportError::MissingData => ErrorCode::MissingData,
            ExportError::FileNotCreated { .. } => ErrorCode::FileNotCreated,
            ExportError::WriteFailed { .. } => ErrorCode::WriteFailed,
        }
    }

    pub(crate) fn write_failed(source: impl Into<BridgeError>) -> Self {
        ExportError::WriteFailed {
            source: source.into(),
        }
    }
}

/// Stable, host-facing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "CANCELED")]
    Canceled,
    #[serde(rename = "MISSING_URI")]
    MissingUri,
    #[serde(rename = "MISSING_DATA")]
    MissingData,
    #[serde(rename = "FILE_NOTCREATED")]
    FileNotCreated,
    #[serde(rename = "WRITE_FAILED")]
    WriteFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Canceled => "CANCELED",
            ErrorCode::MissingUri => "MISSING_URI",
            ErrorCode::MissingData => "MISSING_DATA",
            ErrorCode::FileNotCreated => "FILE_NOTCREATED",
            ErrorCode::WriteFailed => "WRITE_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

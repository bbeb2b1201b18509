//! Shape of the remote status-check response.

use serde::{Deserialize, Serialize};

/// Body of a status-check call: an envelope with an optional error code and
/// message, plus the per-file payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Error code from the service (set on failures).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error message from the service (set on failures).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FileStatusData>,
}

/// Per-file payload of a status response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStatusData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl StatusResponse {
    /// Response carrying only a status, as most in-progress polls do.
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            data: Some(FileStatusData {
                status: Some(status.into()),
                ..FileStatusData::default()
            }),
            ..Self::default()
        }
    }

    /// Failure envelope with an error code and message.
    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
            ..Self::with_status("PARSE_FAILED")
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.status.as_deref())
    }
}

/// Identifies the job being polled, for logs and failure diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessContext {
    pub file_id: String,
}

impl ProcessContext {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

use std::path::PathBuf;

use serde::Deserialize;

/// Task status on the wire. Older servers report `processing` where newer
/// ones say `running`; both decode to [`TaskStatus::Running`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    #[serde(alias = "processing")]
    Running,
    Completed,
    Error,
}

/// One `GET /api/status/{task_id}` payload. Every field besides `status`
/// may be absent; absent numerics decode as zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReport {
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub current_file: Option<String>,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub eta_seconds: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub task_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Failures talking to the server. Carried as plain data so events stay
/// cloneable and comparable in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Message supplied by the server's `{"error": ...}` payload, or the
    /// generic fallback when the body has some other shape.
    #[error("{0}")]
    Server(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid server response: {0}")]
    Decode(String),
    #[error("file too large (max {max_bytes} bytes, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("failed to read input file: {0}")]
    FileRead(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to save result: {0}")]
    Save(String),
}

/// A result file written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub filename: String,
    pub path: PathBuf,
}

/// Events emitted by the background client toward the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    UploadFinished {
        result: Result<String, ApiError>,
    },
    StatusReceived {
        result: Result<StatusReport, ApiError>,
    },
    DownloadFinished {
        result: Result<SavedArtifact, ArtifactError>,
    },
    /// Ctrl-C observed; the frontend decides what cancellation means.
    Interrupted,
}

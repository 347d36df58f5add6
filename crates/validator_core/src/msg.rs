use std::path::PathBuf;

use crate::{StatusSnapshot, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a candidate input file (dialog or drag-drop).
    FileChosen { path: PathBuf },
    /// User cleared the file selection.
    FileCleared,
    /// User asked to submit the selected file for validation.
    SubmitClicked,
    /// The upload request finished; `Ok` carries the new task id.
    UploadFinished { result: Result<TaskId, String> },
    /// One status query came back for the task being polled.
    StatusReceived { result: Result<StatusSnapshot, String> },
    /// User asked to stop watching the running task.
    StopClicked,
    /// User asked to download the completed result.
    DownloadClicked,
    /// Result retrieval finished; `Ok` carries the saved path.
    DownloadFinished { result: Result<String, String> },
    /// UI heartbeat; ages transient notices.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

use std::path::PathBuf;

use crate::{SubmissionConfig, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubmitUpload { file: PathBuf, config: SubmissionConfig },
    StartPolling { task_id: TaskId },
    StopPolling,
    FetchResult { task_id: TaskId },
    Notify(LifecycleEvent),
}

/// Fire-and-forget feedback events; collaborators may observe them, the
/// lifecycle never depends on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    FileAccepted { name: String },
    TaskSubmitted { task_id: TaskId },
    TaskCompleted { task_id: TaskId },
}

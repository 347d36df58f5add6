//! Validator core: pure task-lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, LifecycleEvent};
pub use msg::Msg;
pub use state::{
    AppState, DownloadState, RunDisposition, SessionState, Severity, StatusSnapshot,
    SubmissionConfig, TaskId, TaskStatus,
};
pub use update::{update, ALLOWED_EXTENSIONS, MSG_NO_FILE, MSG_STOPPED, MSG_UNSUPPORTED_FORMAT};
pub use view_model::{format_eta, AppViewModel, NoticeView, ProgressView, PLACEHOLDER};

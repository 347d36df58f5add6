use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, NoticeView, ProgressView, SUCCESS_NOTICE_TICKS};

/// Opaque server-issued task identifier.
pub type TaskId = String;

/// Session phase; anything other than `Idle` blocks a new submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
    Polling,
}

/// Task status as reported by the server. The client never sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Error,
}

/// Immutable per-submission options, built once from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub timeout_secs: u32,
    pub check_smtp: bool,
    pub strict_mode: bool,
    pub max_emails: Option<u32>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            check_smtp: true,
            strict_mode: true,
            max_emails: None,
        }
    }
}

/// Raw status payload for one poll tick, as decoded from the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSnapshot {
    pub status: TaskStatus,
    pub progress: f64,
    pub message: String,
    pub current_file: Option<String>,
    pub processed: u64,
    pub total: u64,
    pub eta_seconds: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// How the last run ended, for frontends that need an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    Completed,
    Failed,
    Cancelled,
}

/// Lifecycle of the download affordance for a completed task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Unavailable,
    Ready,
    Fetching,
    Saved {
        path: String,
    },
    /// Retrieval failed; the task stays completed and the download retriable.
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Notice {
    severity: Severity,
    text: String,
    /// Remaining heartbeat ticks; `None` means visible until replaced.
    ttl_ticks: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: SubmissionConfig,
    selected_file: Option<PathBuf>,
    session: SessionState,
    current_task: Option<TaskId>,
    completed_task: Option<TaskId>,
    download: DownloadState,
    progress: Option<StatusSnapshot>,
    notice: Option<Notice>,
    disposition: Option<RunDisposition>,
    dirty: bool,
}

impl AppState {
    pub fn new(config: SubmissionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            selected_file: self
                .selected_file
                .as_deref()
                .map(display_name)
                .map(str::to_owned),
            can_submit: self.session == SessionState::Idle && self.selected_file.is_some(),
            can_download: self.completed_task.is_some()
                && self.download != DownloadState::Fetching,
            progress: self.progress.as_ref().map(ProgressView::from_snapshot),
            notice: self.notice.as_ref().map(|n| NoticeView {
                severity: n.severity,
                text: n.text.clone(),
            }),
            download: self.download.clone(),
            disposition: self.disposition,
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    pub fn current_task(&self) -> Option<&TaskId> {
        self.current_task.as_ref()
    }

    pub fn completed_task(&self) -> Option<&TaskId> {
        self.completed_task.as_ref()
    }

    pub(crate) fn set_selected(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
        self.dirty = true;
    }

    pub(crate) fn clear_selected(&mut self) {
        self.selected_file = None;
        self.dirty = true;
    }

    /// Enter `Submitting` and reset everything left over from a prior run.
    pub(crate) fn begin_submission(&mut self) {
        self.session = SessionState::Submitting;
        self.current_task = None;
        self.completed_task = None;
        self.download = DownloadState::Unavailable;
        self.progress = None;
        self.disposition = None;
        self.dirty = true;
    }

    pub(crate) fn submission_failed(&mut self) {
        self.session = SessionState::Idle;
        self.current_task = None;
        self.disposition = Some(RunDisposition::Failed);
        self.dirty = true;
    }

    pub(crate) fn start_polling(&mut self, task_id: TaskId) {
        self.session = SessionState::Polling;
        self.current_task = Some(task_id);
        self.dirty = true;
    }

    pub(crate) fn apply_progress(&mut self, snapshot: StatusSnapshot) {
        self.progress = Some(snapshot);
        self.dirty = true;
    }

    /// Terminal success: retain the id for downloading, return to idle.
    pub(crate) fn complete_task(&mut self) -> Option<TaskId> {
        let task_id = self.current_task.take();
        self.completed_task = task_id.clone();
        self.download = DownloadState::Ready;
        self.session = SessionState::Idle;
        self.disposition = Some(RunDisposition::Completed);
        self.dirty = true;
        task_id
    }

    pub(crate) fn fail_task(&mut self) {
        self.current_task = None;
        self.session = SessionState::Idle;
        self.disposition = Some(RunDisposition::Failed);
        self.dirty = true;
    }

    pub(crate) fn cancel_task(&mut self) {
        self.current_task = None;
        self.session = SessionState::Idle;
        self.disposition = Some(RunDisposition::Cancelled);
        self.dirty = true;
    }

    pub(crate) fn begin_download(&mut self) {
        self.download = DownloadState::Fetching;
        self.dirty = true;
    }

    pub(crate) fn download_saved(&mut self, path: String) {
        self.download = DownloadState::Saved { path };
        self.dirty = true;
    }

    pub(crate) fn download_failed(&mut self, message: String) {
        self.download = DownloadState::Failed { message };
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, severity: Severity, text: impl Into<String>) {
        // Success notices auto-hide; info and error stay until replaced.
        let ttl_ticks = match severity {
            Severity::Success => Some(SUCCESS_NOTICE_TICKS),
            Severity::Info | Severity::Error => None,
        };
        self.notice = Some(Notice {
            severity,
            text: text.into(),
            ttl_ticks,
        });
        self.dirty = true;
    }

    pub(crate) fn age_notice(&mut self) {
        let expired = match &mut self.notice {
            Some(Notice {
                ttl_ticks: Some(ttl),
                ..
            }) => {
                *ttl = ttl.saturating_sub(1);
                *ttl == 0
            }
            _ => false,
        };
        if expired {
            self.notice = None;
            self.dirty = true;
        }
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
}

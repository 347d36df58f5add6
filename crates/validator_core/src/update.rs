use std::path::Path;

use crate::{
    AppState, Effect, LifecycleEvent, Msg, SessionState, Severity, StatusSnapshot, TaskStatus,
};

/// File-name extensions the gate accepts, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

pub const MSG_UNSUPPORTED_FORMAT: &str = "Unsupported file format. Use .xlsx, .xls or .csv";
pub const MSG_NO_FILE: &str = "No file selected";
pub const MSG_STOPPED: &str = "Status checks stopped; the server-side job may keep running";

const MSG_UPLOADING: &str = "Uploading file...";
const MSG_SUBMITTED: &str = "File uploaded, validation started";
const MSG_COMPLETED: &str = "Validation completed successfully";
const MSG_POLL_FALLBACK: &str = "Validation failed";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen { path } => {
            if !extension_allowed(&path) {
                // Rejection leaves any previously accepted file untouched.
                state.set_notice(Severity::Error, MSG_UNSUPPORTED_FORMAT);
                return (state, Vec::new());
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_owned();
            state.set_selected(path);
            vec![Effect::Notify(LifecycleEvent::FileAccepted { name })]
        }
        Msg::FileCleared => {
            state.clear_selected();
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Re-entrancy guard: one task in flight at a time.
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            let Some(file) = state.selected_file().map(Path::to_path_buf) else {
                // The gate disables submission, but check anyway.
                state.set_notice(Severity::Error, MSG_NO_FILE);
                return (state, Vec::new());
            };
            let config = state.config().clone();
            state.begin_submission();
            state.set_notice(Severity::Info, MSG_UPLOADING);
            vec![Effect::SubmitUpload { file, config }]
        }
        Msg::UploadFinished { result } => {
            if state.session() != SessionState::Submitting {
                return (state, Vec::new());
            }
            match result {
                Ok(task_id) => {
                    state.start_polling(task_id.clone());
                    state.set_notice(Severity::Info, MSG_SUBMITTED);
                    vec![
                        Effect::StartPolling {
                            task_id: task_id.clone(),
                        },
                        Effect::Notify(LifecycleEvent::TaskSubmitted { task_id }),
                    ]
                }
                Err(message) => {
                    // No task was registered; the server may not even have seen us.
                    state.submission_failed();
                    state.set_notice(Severity::Error, message);
                    Vec::new()
                }
            }
        }
        Msg::StatusReceived { result } => {
            // Late ticks after cancel or completion carry no authority.
            if state.session() != SessionState::Polling {
                return (state, Vec::new());
            }
            match result {
                Ok(snapshot) => apply_status(&mut state, snapshot),
                Err(message) => fail_polling(&mut state, message),
            }
        }
        Msg::StopClicked => {
            if state.session() != SessionState::Polling {
                return (state, Vec::new());
            }
            state.cancel_task();
            state.set_notice(Severity::Info, MSG_STOPPED);
            vec![Effect::StopPolling]
        }
        Msg::DownloadClicked => match state.completed_task().cloned() {
            Some(task_id) if state.view().can_download => {
                state.begin_download();
                vec![Effect::FetchResult { task_id }]
            }
            _ => Vec::new(),
        },
        Msg::DownloadFinished { result } => match result {
            Ok(path) => {
                state.set_notice(Severity::Success, format!("Result saved to {path}"));
                state.download_saved(path);
                Vec::new()
            }
            Err(message) => {
                state.set_notice(Severity::Error, message.clone());
                state.download_failed(message);
                Vec::new()
            }
        },
        Msg::Tick => {
            state.age_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_status(state: &mut AppState, snapshot: StatusSnapshot) -> Vec<Effect> {
    match snapshot.status {
        TaskStatus::Pending | TaskStatus::Running => {
            state.apply_progress(snapshot);
            Vec::new()
        }
        TaskStatus::Completed => {
            state.apply_progress(snapshot);
            let task_id = state.complete_task();
            state.set_notice(Severity::Success, MSG_COMPLETED);
            let mut effects = vec![Effect::StopPolling];
            if let Some(task_id) = task_id {
                effects.push(Effect::Notify(LifecycleEvent::TaskCompleted { task_id }));
            }
            effects
        }
        TaskStatus::Error => {
            // Surface the server's error text verbatim when it gives one.
            let message = snapshot
                .error
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| {
                    if snapshot.message.is_empty() {
                        MSG_POLL_FALLBACK.to_owned()
                    } else {
                        snapshot.message
                    }
                });
            fail_polling(state, message)
        }
    }
}

/// Transport and decode failures terminate the loop exactly like a
/// server-reported error; there is no retry policy.
fn fail_polling(state: &mut AppState, message: String) -> Vec<Effect> {
    state.fail_task();
    state.set_notice(Severity::Error, message);
    vec![Effect::StopPolling]
}

fn extension_allowed(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

use crate::{DownloadState, RunDisposition, SessionState, Severity, StatusSnapshot};

/// Shown where a value is unknown (no total, no ETA).
pub const PLACEHOLDER: &str = "—";

/// Heartbeat ticks a success notice stays visible before auto-hiding.
pub(crate) const SUCCESS_NOTICE_TICKS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub selected_file: Option<String>,
    pub can_submit: bool,
    pub can_download: bool,
    pub progress: Option<ProgressView>,
    pub notice: Option<NoticeView>,
    pub download: DownloadState,
    pub disposition: Option<RunDisposition>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub severity: Severity,
    pub text: String,
}

/// Display values for one status snapshot. Pure formatting; numeric inputs
/// pass through verbatim (out-of-range percents are not re-clamped here).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
    pub counts_label: String,
    pub percent_label: String,
    pub eta_label: String,
    pub message: String,
    pub current_file: Option<String>,
}

impl ProgressView {
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        // Counts and percent are only meaningful once a total is known.
        let (counts_label, percent_label) = if snapshot.total != 0 {
            (
                format!("{} of {}", snapshot.processed, snapshot.total),
                format!("{:.1}%", snapshot.progress),
            )
        } else {
            (PLACEHOLDER.to_owned(), PLACEHOLDER.to_owned())
        };

        Self {
            percent: snapshot.progress,
            counts_label,
            percent_label,
            eta_label: format_eta(snapshot.eta_seconds),
            message: snapshot.message.clone(),
            current_file: snapshot.current_file.clone(),
        }
    }
}

/// `None` and non-positive values mean "unknown"; a minute or more renders
/// as `"{m} min {s} sec"`, anything shorter as `"{s} sec"`.
pub fn format_eta(eta_seconds: Option<f64>) -> String {
    match eta_seconds {
        Some(secs) if secs > 0.0 => {
            if secs >= 60.0 {
                format!(
                    "{} min {} sec",
                    (secs / 60.0).floor() as u64,
                    (secs % 60.0).floor() as u64
                )
            } else {
                format!("{} sec", secs.floor() as u64)
            }
        }
        _ => PLACEHOLDER.to_owned(),
    }
}

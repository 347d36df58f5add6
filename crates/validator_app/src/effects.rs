use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use validator_client::{
    ApiError, ClientEvent, ClientHandle, ClientSettings, StatusReport, UploadOptions,
};
use validator_core::{Effect, LifecycleEvent, Msg, StatusSnapshot, SubmissionConfig, TaskStatus};

use crate::notify::Notifier;

pub struct EffectRunner {
    client: ClientHandle,
    notifiers: Vec<Box<dyn Notifier>>,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        msg_tx: mpsc::Sender<Msg>,
        notifiers: Vec<Box<dyn Notifier>>,
    ) -> Result<Self, ApiError> {
        let client = ClientHandle::new(settings)?;
        let runner = Self { client, notifiers };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn watch_interrupt(&self) {
        self.client.watch_interrupt();
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload { file, config } => {
                    client_info!("SubmitUpload file={:?}", file);
                    self.client.upload(file, upload_options(&config));
                }
                Effect::StartPolling { task_id } => {
                    self.client.start_polling(task_id);
                }
                Effect::StopPolling => {
                    self.client.stop_polling();
                }
                Effect::FetchResult { task_id } => {
                    self.client.download(task_id);
                }
                Effect::Notify(event) => {
                    self.dispatch_notification(&event);
                }
            }
        }
    }

    /// Feedback is cosmetic; a panicking notifier must never take the
    /// lifecycle down with it.
    fn dispatch_notification(&self, event: &LifecycleEvent) {
        for notifier in &self.notifiers {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                notifier.notify(event);
            }));
            if outcome.is_err() {
                client_warn!("notifier panicked on {:?}", event);
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::UploadFinished { result } => Msg::UploadFinished {
            result: result.map_err(|err| err.to_string()),
        },
        ClientEvent::StatusReceived { result } => Msg::StatusReceived {
            result: result.map(map_report).map_err(|err| err.to_string()),
        },
        ClientEvent::DownloadFinished { result } => Msg::DownloadFinished {
            result: result
                .map(|saved| saved.path.display().to_string())
                .map_err(|err| err.to_string()),
        },
        ClientEvent::Interrupted => Msg::StopClicked,
    }
}

fn map_report(report: StatusReport) -> StatusSnapshot {
    StatusSnapshot {
        status: map_status(report.status),
        progress: report.progress,
        message: report.message,
        current_file: report.current_file,
        processed: report.processed,
        total: report.total,
        eta_seconds: report.eta_seconds,
        error: report.error,
    }
}

fn map_status(status: validator_client::TaskStatus) -> TaskStatus {
    match status {
        validator_client::TaskStatus::Pending => TaskStatus::Pending,
        validator_client::TaskStatus::Running => TaskStatus::Running,
        validator_client::TaskStatus::Completed => TaskStatus::Completed,
        validator_client::TaskStatus::Error => TaskStatus::Error,
    }
}

fn upload_options(config: &SubmissionConfig) -> UploadOptions {
    UploadOptions {
        timeout_secs: config.timeout_secs,
        check_smtp: config.check_smtp,
        strict_mode: config.strict_mode,
        max_emails: config.max_emails,
    }
}

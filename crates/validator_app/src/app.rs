use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::bail;
use client_logging::client_info;
use validator_client::{ApiSettings, ClientSettings, POLL_INTERVAL};
use validator_core::{
    update, AppState, DownloadState, Msg, RunDisposition, SessionState, SubmissionConfig,
};

use crate::effects::EffectRunner;
use crate::notify::{LogNotifier, Notifier};
use crate::render;

/// Heartbeat driving notice aging and render coalescing.
const TICK_INTERVAL: Duration = Duration::from_millis(500);

pub struct RunOptions {
    pub file: PathBuf,
    pub server: String,
    pub config: SubmissionConfig,
    pub output_dir: PathBuf,
    pub auto_download: bool,
}

/// One full task lifecycle: gate the file, submit, poll to a terminal
/// state, fetch the result. Returns an error for the CLI exit status when
/// the run failed.
pub fn run(options: RunOptions) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let settings = ClientSettings {
        api: ApiSettings {
            base_url: options.server.clone(),
            ..ApiSettings::default()
        },
        poll_interval: POLL_INTERVAL,
        output_dir: options.output_dir.clone(),
    };
    let notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(LogNotifier)];
    let runner = EffectRunner::new(settings, msg_tx.clone(), notifiers)?;
    runner.watch_interrupt();

    {
        let msg_tx = msg_tx.clone();
        thread::spawn(move || {
            while msg_tx.send(Msg::Tick).is_ok() {
                thread::sleep(TICK_INTERVAL);
            }
        });
    }

    let mut state = AppState::new(options.config);
    let _ = msg_tx.send(Msg::FileChosen { path: options.file });
    let _ = msg_tx.send(Msg::SubmitClicked);

    let mut download_requested = false;
    while let Ok(msg) = msg_rx.recv() {
        let was_gate = matches!(msg, Msg::FileChosen { .. });
        let was_submit = matches!(msg, Msg::SubmitClicked);

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.enqueue(effects);

        let view = state.view();
        if state.consume_dirty() {
            render::present(&render::render(&view));
        }

        // The gate refused the file; nothing was (or will be) submitted.
        if was_gate && !view.can_submit {
            bail!(notice_text(&view.notice, "file was not accepted"));
        }
        // Defensive: submission did not start for some other reason.
        if was_submit && state.session() == SessionState::Idle {
            bail!(notice_text(&view.notice, "file was not accepted"));
        }

        match view.disposition {
            Some(RunDisposition::Completed) => {
                if options.auto_download && !download_requested {
                    download_requested = true;
                    let _ = msg_tx.send(Msg::DownloadClicked);
                }
                match &view.download {
                    DownloadState::Saved { path } => {
                        client_info!("result saved to {path}");
                        return Ok(());
                    }
                    DownloadState::Failed { message } => {
                        bail!("download failed: {message}");
                    }
                    _ if !options.auto_download => return Ok(()),
                    _ => {}
                }
            }
            Some(RunDisposition::Failed) => {
                bail!(notice_text(&view.notice, "validation failed"));
            }
            Some(RunDisposition::Cancelled) => {
                client_info!("validation stopped by user");
                return Ok(());
            }
            None => {}
        }
    }

    Ok(())
}

fn notice_text(notice: &Option<validator_core::NoticeView>, fallback: &str) -> String {
    notice
        .as_ref()
        .map(|n| n.text.clone())
        .unwrap_or_else(|| fallback.to_owned())
}

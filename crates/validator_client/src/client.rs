use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};

use crate::api::{ApiClient, ApiSettings, UploadOptions};
use crate::poll::{ChannelEventSink, EventSink, PollSchedule, POLL_INTERVAL};
use crate::save::save_artifact;
use crate::types::{ApiError, ArtifactError, ClientEvent, SavedArtifact};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub poll_interval: Duration,
    pub output_dir: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            poll_interval: POLL_INTERVAL,
            output_dir: PathBuf::from("output"),
        }
    }
}

enum ClientCommand {
    Upload { file: PathBuf, options: UploadOptions },
    StartPolling { task_id: String },
    StopPolling,
    Download { task_id: String },
    WatchInterrupt,
}

/// Handle to the background client: commands in, events out. The command
/// loop owns the runtime and the single live poll schedule.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let api = Arc::new(ApiClient::new(settings.api.clone())?);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut active_poll: Option<PollSchedule> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Upload { file, options } => {
                        client_info!("upload file={:?}", file);
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = api.upload(&file, &options).await;
                            if let Err(err) = &result {
                                client_warn!("upload failed: {err}");
                            }
                            sink.emit(ClientEvent::UploadFinished { result });
                        });
                    }
                    ClientCommand::StartPolling { task_id } => {
                        // Exactly one live schedule: replacing cancels first.
                        if let Some(poll) = active_poll.take() {
                            poll.cancel();
                        }
                        client_info!("start polling task_id={task_id}");
                        let _guard = runtime.enter();
                        active_poll = Some(PollSchedule::spawn(
                            api.clone(),
                            task_id,
                            settings.poll_interval,
                            sink.clone(),
                        ));
                    }
                    ClientCommand::StopPolling => {
                        if let Some(poll) = active_poll.take() {
                            poll.cancel();
                            client_info!("polling stopped");
                        }
                    }
                    ClientCommand::Download { task_id } => {
                        client_info!("download task_id={task_id}");
                        let api = api.clone();
                        let sink = sink.clone();
                        let output_dir = settings.output_dir.clone();
                        runtime.spawn(async move {
                            let result =
                                download_and_save(api.as_ref(), &task_id, &output_dir).await;
                            if let Err(err) = &result {
                                client_warn!("download failed: {err}");
                            }
                            sink.emit(ClientEvent::DownloadFinished { result });
                        });
                    }
                    ClientCommand::WatchInterrupt => {
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            if tokio::signal::ctrl_c().await.is_ok() {
                                sink.emit(ClientEvent::Interrupted);
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn upload(&self, file: impl AsRef<Path>, options: UploadOptions) {
        let _ = self.cmd_tx.send(ClientCommand::Upload {
            file: file.as_ref().to_path_buf(),
            options,
        });
    }

    pub fn start_polling(&self, task_id: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::StartPolling {
            task_id: task_id.into(),
        });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(ClientCommand::StopPolling);
    }

    pub fn download(&self, task_id: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Download {
            task_id: task_id.into(),
        });
    }

    /// Forward the next Ctrl-C as [`ClientEvent::Interrupted`].
    pub fn watch_interrupt(&self) {
        let _ = self.cmd_tx.send(ClientCommand::WatchInterrupt);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn download_and_save(
    api: &ApiClient,
    task_id: &str,
    output_dir: &Path,
) -> Result<SavedArtifact, ArtifactError> {
    let artifact = api.download(task_id).await?;
    let path = save_artifact(output_dir, &artifact.filename, &artifact.bytes)
        .map_err(|err| ArtifactError::Save(err.to_string()))?;
    Ok(SavedArtifact {
        filename: artifact.filename,
        path,
    })
}

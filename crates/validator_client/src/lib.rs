//! Validator client: HTTP engine for the validation task lifecycle.
mod api;
mod client;
mod filename;
mod poll;
mod save;
mod types;

pub use api::{ApiClient, ApiSettings, DownloadedArtifact, UploadOptions};
pub use client::{ClientHandle, ClientSettings};
pub use filename::{result_filename, DEFAULT_RESULT_NAME};
pub use poll::{ChannelEventSink, EventSink, PollSchedule, StatusSource, POLL_INTERVAL};
pub use save::{ensure_output_dir, save_artifact, SaveError};
pub use types::{ApiError, ArtifactError, ClientEvent, SavedArtifact, StatusReport, TaskStatus};

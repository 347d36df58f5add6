use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::types::{ApiError, ClientEvent, StatusReport};

/// Fixed cadence of status queries for the active task.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    async fn status(&self, task_id: &str) -> Result<StatusReport, ApiError>;
}

#[async_trait::async_trait]
impl StatusSource for ApiClient {
    async fn status(&self, task_id: &str) -> Result<StatusReport, ApiError> {
        ApiClient::status(self, task_id).await
    }
}

/// One recurring status query. Cancelling stops all future queries; a
/// query already in flight is abandoned rather than reported.
pub struct PollSchedule {
    cancel: CancellationToken,
}

impl PollSchedule {
    /// Spawns the recurring query onto the current runtime. The first
    /// query fires one full period after start.
    pub fn spawn(
        source: Arc<dyn StatusSource>,
        task_id: String,
        period: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticks.tick() => {}
                }
                let result = tokio::select! {
                    _ = token.cancelled() => break,
                    result = source.status(&task_id) => result,
                };
                sink.emit(ClientEvent::StatusReceived { result });
            }
        });
        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for PollSchedule {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

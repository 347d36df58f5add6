use client_logging::client_info;
use validator_core::LifecycleEvent;

/// External feedback collaborator. Events are fire-and-forget; the task
/// lifecycle never waits on a notifier and runs fine with none registered.
pub trait Notifier: Send {
    fn notify(&self, event: &LifecycleEvent);
}

/// Default when no feedback channel is wanted.
#[allow(dead_code)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _event: &LifecycleEvent) {}
}

/// Writes lifecycle events to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::FileAccepted { name } => client_info!("file accepted: {name}"),
            LifecycleEvent::TaskSubmitted { task_id } => client_info!("task submitted: {task_id}"),
            LifecycleEvent::TaskCompleted { task_id } => client_info!("task completed: {task_id}"),
        }
    }
}

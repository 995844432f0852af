//! Tokio-backed task spawner with a designated UI run loop.

use fundry_core::effects::task::{BoxTask, TaskEffects};
use tokio::sync::mpsc;

type UiJob = Box<dyn FnOnce() + Send>;

/// Spawner used by real frontends: background futures go onto the tokio
/// runtime, UI closures are queued to the single [`UiRunLoop`] the
/// frontend drives on its main thread.
pub struct TokioTasks {
    handle: tokio::runtime::Handle,
    ui_tx: mpsc::UnboundedSender<UiJob>,
}

impl TokioTasks {
    /// Create a spawner plus the run loop the frontend must drive.
    pub fn new(handle: tokio::runtime::Handle) -> (Self, UiRunLoop) {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        (Self { handle, ui_tx }, UiRunLoop { ui_rx })
    }
}

impl TaskEffects for TokioTasks {
    fn spawn(&self, task: BoxTask) {
        self.handle.spawn(task);
    }

    fn spawn_ui(&self, task: Box<dyn FnOnce() + Send>) {
        // A closed receiver means the frontend is shutting down; dropping
        // the job is the right behavior then.
        let _ = self.ui_tx.send(task);
    }
}

/// Consumes UI jobs in submission order. The owning frontend calls
/// [`UiRunLoop::run`] from its main task, or [`UiRunLoop::drain`] once
/// per frame for immediate-mode UIs.
pub struct UiRunLoop {
    ui_rx: mpsc::UnboundedReceiver<UiJob>,
}

impl UiRunLoop {
    /// Run jobs until every sender is gone.
    pub async fn run(mut self) {
        while let Some(job) = self.ui_rx.recv().await {
            job();
        }
    }

    /// Run every job currently queued, without waiting.
    pub fn drain(&mut self) {
        while let Ok(job) = self.ui_rx.try_recv() {
            job();
        }
    }
}

//! Deterministic task scheduler.

use std::collections::VecDeque;

use parking_lot::Mutex;

use fundry_core::effects::task::{BoxTask, TaskEffects};

enum Job {
    Background(BoxTask),
    Ui(Box<dyn FnOnce() + Send>),
}

/// Queues every spawned job; nothing runs until [`TestTasks::advance`].
///
/// Spawning while the queue drains (an async completion spawning a UI
/// hop, a combination firing a follow-up fetch) appends to the same
/// queue, and `advance` keeps draining until it is empty, so one call
/// settles the whole cascade. Background futures are driven to
/// completion on the calling thread, so scripted services must resolve
/// without external wake-ups (the mocks here do).
#[derive(Default)]
pub struct TestTasks {
    queue: Mutex<VecDeque<Job>>,
}

impl TestTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs currently waiting.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run queued jobs (and any they enqueue) until none remain.
    pub fn advance(&self) {
        loop {
            let job = self.queue.lock().pop_front();
            match job {
                Some(Job::Background(task)) => futures::executor::block_on(task),
                Some(Job::Ui(task)) => task(),
                None => break,
            }
        }
    }
}

impl TaskEffects for TestTasks {
    fn spawn(&self, task: BoxTask) {
        self.queue.lock().push_back(Job::Background(task));
    }

    fn spawn_ui(&self, task: Box<dyn FnOnce() + Send>) {
        self.queue.lock().push_back(Job::Ui(task));
    }
}

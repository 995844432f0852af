//! The async edge of the signal graph: switch-to-latest and the UI hop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;

use super::core::Signal;
use crate::effects::task::TaskEffects;

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Run an async request per upstream value, emitting only results of
    /// the most recent request ("switch to latest").
    ///
    /// Each upstream value takes a fresh generation number and spawns its
    /// future on `tasks`; a completion whose generation is no longer
    /// current is discarded, so a new identical-shaped request supersedes
    /// any in-flight one. The future returns `Option<U>`: failures must
    /// already be demoted (see
    /// [`ResultDemote`](crate::effects::api::ResultDemote)), and `None`
    /// produces no emission for that cycle.
    pub fn switch_map<U, F>(&self, tasks: &Arc<dyn TaskEffects>, f: F) -> Signal<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&T) -> BoxFuture<'static, Option<U>> + Send + Sync + 'static,
    {
        let generation = Arc::new(AtomicU64::new(0));
        let (signal, sink) = Signal::pipe();
        let tasks = Arc::clone(tasks);
        self.observe(move |value| {
            let current = generation.fetch_add(1, Ordering::SeqCst) + 1;
            let generation = generation.clone();
            let sink = sink.clone();
            let future = f(value);
            tasks.spawn(Box::pin(async move {
                let result = future.await;
                if generation.load(Ordering::SeqCst) != current {
                    return; // superseded while in flight
                }
                if let Some(output) = result {
                    sink.send(output);
                }
            }));
        });
        signal
    }

    /// Re-deliver each emission on the designated UI executor.
    ///
    /// Required between async completions (which land on an arbitrary
    /// task context) and any UI-bound consumption.
    pub fn observe_on_ui(&self, tasks: &Arc<dyn TaskEffects>) -> Signal<T> {
        let (signal, sink) = Signal::pipe();
        let tasks = Arc::clone(tasks);
        self.observe(move |value| {
            let sink = sink.clone();
            let value = value.clone();
            tasks.spawn_ui(Box::new(move || sink.send(value)));
        });
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::task::BoxTask;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Minimal deterministic spawner: queues work, runs it on `advance`.
    /// The full-featured version lives in fundry-testkit; this local copy
    /// keeps core's tests dependency-free.
    #[derive(Default)]
    struct QueueTasks {
        queue: Mutex<VecDeque<Job>>,
    }

    enum Job {
        Task(BoxTask),
        Ui(Box<dyn FnOnce() + Send>),
    }

    impl TaskEffects for QueueTasks {
        fn spawn(&self, task: BoxTask) {
            self.queue.lock().push_back(Job::Task(task));
        }

        fn spawn_ui(&self, task: Box<dyn FnOnce() + Send>) {
            self.queue.lock().push_back(Job::Ui(task));
        }
    }

    impl QueueTasks {
        fn advance(&self) {
            loop {
                let job = self.queue.lock().pop_front();
                match job {
                    Some(Job::Task(task)) => futures::executor::block_on(task),
                    Some(Job::Ui(task)) => task(),
                    None => break,
                }
            }
        }
    }

    fn collect<T: Clone + Send + Sync + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        signal.observe(move |v| sink.lock().push(v.clone()));
        seen
    }

    #[test]
    fn switch_map_emits_only_the_latest_request() {
        let queue = Arc::new(QueueTasks::default());
        let tasks: Arc<dyn TaskEffects> = queue.clone();
        let (signal, sink) = Signal::pipe();

        let fetched = signal.switch_map(&tasks, |v: &i32| {
            let v = *v;
            Box::pin(async move { Some(v * 10) })
        });
        let seen = collect(&fetched);

        // Two requests issued before either completes: the first is
        // superseded and its result must be dropped.
        sink.send(1);
        sink.send(2);

        queue.advance();

        assert_eq!(*seen.lock(), vec![20]);
    }

    #[test]
    fn switch_map_none_produces_no_emission() {
        let queue = Arc::new(QueueTasks::default());
        let tasks: Arc<dyn TaskEffects> = queue.clone();
        let (signal, sink) = Signal::pipe();

        let fetched = signal.switch_map(&tasks, |v: &i32| {
            let v = *v;
            Box::pin(async move { if v > 0 { Some(v) } else { None } })
        });
        let seen = collect(&fetched);

        sink.send(-1);
        queue.advance();
        assert!(seen.lock().is_empty());

        sink.send(3);
        queue.advance();
        assert_eq!(*seen.lock(), vec![3]);
    }

    #[test]
    fn observe_on_ui_redelivers_via_the_ui_queue() {
        let queue = Arc::new(QueueTasks::default());
        let tasks: Arc<dyn TaskEffects> = queue.clone();
        let (signal, sink) = Signal::pipe();

        let hopped = signal.observe_on_ui(&tasks);
        let seen = collect(&hopped);

        sink.send(1);
        assert!(seen.lock().is_empty(), "no delivery before the UI queue runs");

        queue.advance();
        assert_eq!(*seen.lock(), vec![1]);
    }
}

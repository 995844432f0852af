//! Composition operators.
//!
//! All combination semantics are backpressure-free: each operator keeps at
//! most the latest value per source. Operator state lives behind a mutex
//! inside the operator closure; guards are always dropped before pushing
//! downstream so observers can re-enter the graph.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::core::Signal;

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Transform each value.
    pub fn map<U, F>(&self, f: F) -> Signal<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let (signal, sink) = Signal::pipe();
        self.observe(move |value| sink.send(f(value)));
        signal
    }

    /// Keep only values matching the predicate.
    pub fn filter<F>(&self, predicate: F) -> Signal<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let (signal, sink) = Signal::pipe();
        self.observe(move |value| {
            if predicate(value) {
                sink.send(value.clone());
            }
        });
        signal
    }

    /// Transform and filter in one step; `None` results are dropped.
    /// This is the sanctioned way to discard invalid or absent input
    /// (malformed URLs, unmatched routes) without failing.
    pub fn filter_map<U, F>(&self, f: F) -> Signal<U>
    where
        U: Send + Sync + 'static,
        F: Fn(&T) -> Option<U> + Send + Sync + 'static,
    {
        let (signal, sink) = Signal::pipe();
        self.observe(move |value| {
            if let Some(mapped) = f(value) {
                sink.send(mapped);
            }
        });
        signal
    }

    /// Suppress consecutive duplicate values.
    pub fn skip_repeats(&self) -> Signal<T>
    where
        T: PartialEq,
    {
        let (signal, sink) = Signal::pipe();
        let last: Mutex<Option<T>> = Mutex::new(None);
        self.observe(move |value| {
            let changed = {
                let mut last = last.lock();
                if last.as_ref() == Some(value) {
                    false
                } else {
                    *last = Some(value.clone());
                    true
                }
            };
            if changed {
                sink.send(value.clone());
            }
        });
        signal
    }

    /// Merge any number of same-typed sources into one signal.
    pub fn merge(sources: &[Signal<T>]) -> Signal<T> {
        let (signal, sink) = Signal::pipe();
        for source in sources {
            let sink = sink.clone();
            source.observe(move |value| sink.send(value.clone()));
        }
        signal
    }

    /// Emit the latest value of `self` whenever `trigger` fires. Nothing
    /// is emitted until `self` has fired at least once.
    pub fn sample_on<U>(&self, trigger: &Signal<U>) -> Signal<T>
    where
        U: Send + Sync + 'static,
    {
        let latest: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
        {
            let latest = latest.clone();
            self.observe(move |value| *latest.lock() = Some(value.clone()));
        }
        let (signal, sink) = Signal::pipe();
        trigger.observe(move |_| {
            let value = latest.lock().clone();
            if let Some(value) = value {
                sink.send(value);
            }
        });
        signal
    }

    /// Pair the latest value of `self` with each value of `trigger`.
    /// Nothing is emitted until `self` has fired at least once.
    pub fn sample_pair_on<U>(&self, trigger: &Signal<U>) -> Signal<(T, U)>
    where
        U: Clone + Send + Sync + 'static,
    {
        let latest: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
        {
            let latest = latest.clone();
            self.observe(move |value| *latest.lock() = Some(value.clone()));
        }
        let (signal, sink) = Signal::pipe();
        trigger.observe(move |trigger_value| {
            let value = latest.lock().clone();
            if let Some(value) = value {
                sink.send((value, trigger_value.clone()));
            }
        });
        signal
    }

    /// Emit `(previous, current)` pairs, seeded with `initial` as the
    /// first "previous".
    pub fn combine_previous(&self, initial: T) -> Signal<(T, T)> {
        let (signal, sink) = Signal::pipe();
        let previous = Mutex::new(initial);
        self.observe(move |value| {
            let prior = {
                let mut previous = previous.lock();
                std::mem::replace(&mut *previous, value.clone())
            };
            sink.send((prior, value.clone()));
        });
        signal
    }

    /// Pass through only the first `count` values. Used for
    /// first-value-wins readiness gating.
    pub fn take_first(&self, count: usize) -> Signal<T> {
        let (signal, sink) = Signal::pipe();
        let taken = AtomicUsize::new(0);
        self.observe(move |value| {
            if taken.load(Ordering::SeqCst) < count {
                taken.fetch_add(1, Ordering::SeqCst);
                sink.send(value.clone());
            }
        });
        signal
    }

    /// Run a side effect for each value, passing the value through.
    ///
    /// This is the only sanctioned place an output chain touches shared
    /// state (preference writes, analytics), and each such use must be
    /// called out in the owning view-model's docs.
    pub fn on_value<F>(&self, f: F) -> Signal<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let (signal, sink) = Signal::pipe();
        self.observe(move |value| {
            f(value);
            sink.send(value.clone());
        });
        signal
    }
}

/// Emit a tuple of the latest value per source, once both have fired,
/// then again on every subsequent update from either side.
pub fn combine_latest<A, B>(a: &Signal<A>, b: &Signal<B>) -> Signal<(A, B)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let state: Arc<Mutex<(Option<A>, Option<B>)>> = Arc::new(Mutex::new((None, None)));
    let (signal, sink) = Signal::pipe();
    {
        let state = state.clone();
        let sink = sink.clone();
        a.observe(move |value| {
            let ready = {
                let mut state = state.lock();
                state.0 = Some(value.clone());
                latest_pair(&state)
            };
            if let Some(pair) = ready {
                sink.send(pair);
            }
        });
    }
    b.observe(move |value| {
        let ready = {
            let mut state = state.lock();
            state.1 = Some(value.clone());
            latest_pair(&state)
        };
        if let Some(pair) = ready {
            sink.send(pair);
        }
    });
    signal
}

/// Three-way [`combine_latest`].
pub fn combine_latest3<A, B, C>(
    a: &Signal<A>,
    b: &Signal<B>,
    c: &Signal<C>,
) -> Signal<(A, B, C)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    combine_latest(&combine_latest(a, b), c).map(|nested| {
        let ((a, b), c) = nested.clone();
        (a, b, c)
    })
}

/// Pair values from two sources one-for-one. Each side buffers at most
/// one pending value (latest wins within the buffer); both buffers are
/// consumed when a pair is emitted.
pub fn zip<A, B>(a: &Signal<A>, b: &Signal<B>) -> Signal<(A, B)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let state: Arc<Mutex<(Option<A>, Option<B>)>> = Arc::new(Mutex::new((None, None)));
    let (signal, sink) = Signal::pipe();
    {
        let state = state.clone();
        let sink = sink.clone();
        a.observe(move |value| {
            let pair = {
                let mut state = state.lock();
                state.0 = Some(value.clone());
                take_pair(&mut state)
            };
            if let Some(pair) = pair {
                sink.send(pair);
            }
        });
    }
    b.observe(move |value| {
        let pair = {
            let mut state = state.lock();
            state.1 = Some(value.clone());
            take_pair(&mut state)
        };
        if let Some(pair) = pair {
            sink.send(pair);
        }
    });
    signal
}

fn latest_pair<A: Clone, B: Clone>(state: &(Option<A>, Option<B>)) -> Option<(A, B)> {
    match (&state.0, &state.1) {
        (Some(a), Some(b)) => Some((a.clone(), b.clone())),
        _ => None,
    }
}

fn take_pair<A, B>(state: &mut (Option<A>, Option<B>)) -> Option<(A, B)> {
    if state.0.is_some() && state.1.is_some() {
        Some((state.0.take()?, state.1.take()?))
    } else {
        None
    }
}

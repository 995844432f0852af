//! # Reactive Signal Primitives
//!
//! A small push-based signal graph for unidirectional-dataflow view-models.
//! A view-model owns a set of input [`Slot`]s (one per UI/lifecycle event)
//! and derives output [`Signal`]s from them once, in its constructor. The
//! UI layer records events into the slots and observes the outputs; the
//! view-model itself never touches a UI framework.
//!
//! ## Semantics
//!
//! - **Synchronous push**: sending a value invokes every observer before
//!   `send` returns. There is no internal queueing and no backpressure:
//!   combination operators keep at most the latest value per source
//!   (drop-old-keep-new).
//! - **Stateless signals, stateful operators**: a [`Signal`] is only an
//!   observer list. Operator state (latest values, zip buffers, de-dup
//!   memory) lives inside the operator closures and dies with the graph.
//! - **Latest-wins inputs**: a [`Slot`] records the most recent value of
//!   its event kind and re-broadcasts it; older values are discarded, and
//!   recording never fails.
//! - **Async at the edge only**: the only suspension point is
//!   [`Signal::switch_map`], which runs a future per upstream value via a
//!   [`TaskEffects`](crate::effects::task::TaskEffects) spawner and
//!   discards results of superseded requests. [`Signal::observe_on_ui`]
//!   hops emissions back onto the designated UI executor.
//!
//! Dispatch order is registration order, which for a view-model graph is
//! construction order, which makes every composition deterministic and
//! replayable in tests.

mod combinators;
mod core;
mod slot;
mod switching;

pub use self::core::{Signal, Sink};
pub use combinators::{combine_latest, combine_latest3, zip};
pub use slot::Slot;

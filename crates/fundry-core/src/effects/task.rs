//! Task spawning effect.
//!
//! The signal graph is synchronous; the only async work a view-model ever
//! starts is a service request (`switch_map`) or a hop back onto the UI
//! executor (`observe_on_ui`). Both go through this trait, which is the
//! seam deterministic test schedulers plug into.

use futures::future::BoxFuture;

/// A unit of background async work.
pub type BoxTask = BoxFuture<'static, ()>;

/// Spawns background futures and UI-executor closures.
///
/// `spawn` may run the task on any thread; `spawn_ui` must run the
/// closure on the single designated UI execution context, in submission
/// order. Neither reports completion; the work itself pushes results
/// back into the signal graph.
pub trait TaskEffects: Send + Sync {
    /// Run `task` in the background.
    fn spawn(&self, task: BoxTask);

    /// Run `task` on the designated UI executor.
    fn spawn_ui(&self, task: Box<dyn FnOnce() + Send>);
}

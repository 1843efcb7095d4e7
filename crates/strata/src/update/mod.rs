//! Serialized snapshot updates.
//!
//! The [`UpdateController`] owns the applied [`Snapshot`](crate::model::Snapshot)
//! and is the only way to change it. Each mutation is diffed by a
//! [`DiffEngine`] into an [`EditScript`], wrapped in a [`Transition`] and
//! handed to the [`ListHost`]. The host may finish synchronously or later;
//! until it does, further operations wait in a FIFO queue:
//!
//! ```text
//! Idle --update/reload/remove--> Updating --finish_transition--> Idle
//!   ^                                                              |
//!   +------------------- next queued action -----------------------+
//! ```
//!
//! Scrolling, display notifications, layout invalidation and recorded
//! reorders go through the same queue, so they always observe the snapshot
//! left by the operations submitted before them.

mod controller;
mod diff;
mod handle;
mod host;
mod queue;

pub use controller::UpdateController;
pub use diff::{DiffEngine, EditScript, KeyedDiff};
pub use handle::ControllerHandle;
pub use host::{
    Edge, ItemMoved, ListHost, ScrollPosition, ScrollRequest, ScrollTarget, SnapshotApplied, Transition,
    TransitionAttributes, TransitionCompletion, TransitionCustomizer,
};
pub use queue::{Completion, UpdateState};

//! The action queue behind the update controller.

use std::collections::VecDeque;
use std::fmt;

use strata_core::logging::targets;

use super::host::ScrollTarget;
use crate::model::{IndexPath, Snapshot};

/// A callback run once an operation has fully completed.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// Whether a transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateState {
    /// Ready to run the next action.
    #[default]
    Idle,
    /// Waiting for the host to finish a transition.
    Updating,
}

/// An operation waiting for its turn.
pub(crate) enum Action {
    UpdateSnapshot {
        snapshot: Snapshot,
        animated: bool,
        completion: Option<Completion>,
    },
    Reload {
        completion: Option<Completion>,
    },
    RemoveItem {
        at: IndexPath,
        animated: bool,
        completion: Option<Completion>,
    },
    ScrollTo {
        target: ScrollTarget,
        animated: bool,
    },
    WillDisplay,
    DidEndDisplaying,
    InvalidateLayout,
    MoveItem {
        from: IndexPath,
        to: IndexPath,
    },
}

impl Action {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Action::UpdateSnapshot { .. } => "update_snapshot",
            Action::Reload { .. } => "reload",
            Action::RemoveItem { .. } => "remove_item",
            Action::ScrollTo { .. } => "scroll_to",
            Action::WillDisplay => "will_display",
            Action::DidEndDisplaying => "did_end_displaying",
            Action::InvalidateLayout => "invalidate_layout",
            Action::MoveItem { .. } => "move_item",
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The transition the host is working on.
pub(crate) struct InFlight {
    /// Snapshot to install on completion. `None` for reloads.
    pub(crate) pending: Option<Snapshot>,
    pub(crate) completion: Option<Completion>,
}

/// FIFO of actions. Nothing is dropped, reordered or merged.
#[derive(Debug, Default)]
pub(crate) struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub(crate) fn push(&mut self, action: Action) {
        tracing::trace!(
            target: targets::UPDATE,
            action = action.name(),
            queued = self.actions.len() + 1,
            "action queued"
        );
        self.actions.push_back(action);
    }

    pub(crate) fn pop(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo() {
        let mut queue = ActionQueue::default();
        queue.push(Action::WillDisplay);
        queue.push(Action::InvalidateLayout);
        queue.push(Action::Reload { completion: None });
        assert_eq!(queue.len(), 3);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|a| a.name()).collect();
        assert_eq!(order, ["will_display", "invalidate_layout", "reload"]);
        assert_eq!(queue.len(), 0);
    }
}

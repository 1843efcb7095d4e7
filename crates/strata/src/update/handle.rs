//! Cross-thread access to an update controller.

use std::fmt;

use strata_core::{CompletionWaiter, Poster};

use super::controller::UpdateController;
use super::host::{ListHost, ScrollTarget};
use crate::model::{IndexPath, Snapshot};

/// A `Send + Sync + Clone` handle to an [`UpdateController`].
///
/// Calls are posted to the controller's mailbox and run, in posting order,
/// the next time the owner calls
/// [`process_posted`](UpdateController::process_posted). Every method returns
/// `false` once the controller has been dropped.
pub struct ControllerHandle<H: ListHost> {
    poster: Poster<UpdateController<H>>,
}

impl<H: ListHost> Clone for ControllerHandle<H> {
    fn clone(&self) -> Self {
        Self {
            poster: self.poster.clone(),
        }
    }
}

impl<H: ListHost + 'static> ControllerHandle<H> {
    pub(crate) fn new(poster: Poster<UpdateController<H>>) -> Self {
        Self { poster }
    }

    /// Run `invoke` against the controller on its own context.
    pub fn post<F>(&self, invoke: F) -> bool
    where
        F: FnOnce(&mut UpdateController<H>) + Send + 'static,
    {
        self.poster.post(invoke)
    }

    /// Like [`post`](Self::post), returning a waiter released once `invoke`
    /// has run. Waiting on the owner's own thread deadlocks.
    pub fn post_with_completion<F>(&self, invoke: F) -> Option<CompletionWaiter>
    where
        F: FnOnce(&mut UpdateController<H>) + Send + 'static,
    {
        self.poster.post_with_completion(invoke)
    }

    /// Post [`UpdateController::update_snapshot`].
    pub fn update_snapshot(&self, sections: impl Into<Snapshot>, animated: bool) -> bool {
        let snapshot = sections.into();
        self.post(move |controller| controller.update_snapshot(snapshot, animated, None))
    }

    /// Post [`UpdateController::update_snapshot`] with a completion.
    pub fn update_snapshot_then<F>(&self, sections: impl Into<Snapshot>, animated: bool, completion: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let snapshot = sections.into();
        self.post(move |controller| {
            controller.update_snapshot(snapshot, animated, Some(Box::new(completion)));
        })
    }

    /// Post [`UpdateController::remove_item`].
    pub fn remove_item(&self, at: IndexPath, animated: Option<bool>) -> bool {
        self.post(move |controller| controller.remove_item(at, animated, None))
    }

    /// Post [`UpdateController::reload`].
    pub fn reload(&self) -> bool {
        self.post(|controller| controller.reload(None))
    }

    /// Post [`UpdateController::scroll_to`].
    pub fn scroll_to(&self, target: impl Into<ScrollTarget>, animated: bool) -> bool {
        let target = target.into();
        self.post(move |controller| controller.scroll_to(target, animated))
    }

    /// Post [`UpdateController::invalidate_layout`].
    pub fn invalidate_layout(&self) -> bool {
        self.post(|controller| controller.invalidate_layout())
    }
}

impl<H: ListHost> fmt::Debug for ControllerHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerHandle").finish_non_exhaustive()
    }
}

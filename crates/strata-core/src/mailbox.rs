//! Cross-thread hop into a single owning context.
//!
//! A [`Mailbox<T>`] lives inside an owner of type `T` that is pinned to one
//! thread. Any thread may hold a [`Poster<T>`] and post closures that need
//! `&mut T`; they are not run until the owner drains its mailbox on its own
//! thread.
//!
//! # How It Works
//!
//! 1. A poster wraps the closure in a [`QueuedInvocation`] and sends it over
//!    an unbounded channel.
//! 2. The owner calls [`Mailbox::take_pending`] on its context and executes
//!    each invocation against itself, in posting order.
//! 3. If the poster asked for a [`CompletionWaiter`], it is released once the
//!    invocation has run.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};

use crate::logging::targets;

/// A type-erased invocation waiting to run against its owner.
pub struct QueuedInvocation<T> {
    invoke: Box<dyn FnOnce(&mut T) + Send>,
    completion: Option<CompletionHandle>,
}

impl<T> QueuedInvocation<T> {
    /// Create a new queued invocation.
    pub fn new<F>(invoke: F) -> Self
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        Self {
            invoke: Box::new(invoke),
            completion: None,
        }
    }

    /// Create a new queued invocation that releases a waiter when done.
    pub fn with_completion<F>(invoke: F, completion: CompletionHandle) -> Self
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        Self {
            invoke: Box::new(invoke),
            completion: Some(completion),
        }
    }

    /// Execute the invocation against its owner.
    pub fn execute(self, target: &mut T) {
        (self.invoke)(target);
        if let Some(completion) = self.completion {
            completion.signal_done();
        }
    }
}

/// The owner-side half of a mailbox.
pub struct Mailbox<T> {
    sender: Sender<QueuedInvocation<T>>,
    receiver: Receiver<QueuedInvocation<T>>,
    posted: Arc<AtomicU64>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            posted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a poster that can be sent to other threads.
    pub fn poster(&self) -> Poster<T> {
        Poster {
            sender: self.sender.clone(),
            posted: self.posted.clone(),
        }
    }

    /// Number of invocations waiting to be drained.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Total number of invocations ever posted.
    pub fn posted_count(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }

    /// Remove every pending invocation, in posting order.
    ///
    /// The caller executes them; this keeps the mailbox borrow separate from
    /// the owner borrow.
    pub fn take_pending(&self) -> Vec<QueuedInvocation<T>> {
        self.receiver.try_iter().collect()
    }
}

impl<T> std::fmt::Debug for Mailbox<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox")
            .field("pending", &self.receiver.len())
            .field("posted", &self.posted.load(Ordering::Relaxed))
            .finish()
    }
}

/// The sending half of a mailbox. `Send + Sync + Clone`.
pub struct Poster<T> {
    sender: Sender<QueuedInvocation<T>>,
    posted: Arc<AtomicU64>,
}

impl<T> Clone for Poster<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            posted: self.posted.clone(),
        }
    }
}

impl<T> Poster<T> {
    /// Post a closure to run on the owner's context.
    ///
    /// Returns `false` if the owner has been dropped.
    pub fn post<F>(&self, invoke: F) -> bool
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.send(QueuedInvocation::new(invoke))
    }

    /// Post a closure and get a waiter that is released once it has run.
    ///
    /// Returns `None` if the owner has been dropped.
    ///
    /// # Warning
    ///
    /// Waiting on the owner's own thread deadlocks: the owner cannot drain
    /// while it is blocked.
    pub fn post_with_completion<F>(&self, invoke: F) -> Option<CompletionWaiter>
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let (handle, waiter) = completion_pair();
        self.send(QueuedInvocation::with_completion(invoke, handle))
            .then_some(waiter)
    }

    fn send(&self, invocation: QueuedInvocation<T>) -> bool {
        if self.sender.send(invocation).is_err() {
            tracing::warn!(target: targets::MAILBOX, "owner dropped; discarding posted invocation");
            return false;
        }
        self.posted.fetch_add(1, Ordering::Relaxed);
        true
    }
}

impl<T> std::fmt::Debug for Poster<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poster").finish_non_exhaustive()
    }
}

/// A handle for signaling completion of a posted invocation.
pub struct CompletionHandle {
    inner: Arc<CompletionState>,
}

impl CompletionHandle {
    fn signal_done(self) {
        let mut done = self.inner.done.lock();
        *done = true;
        self.inner.condvar.notify_all();
    }
}

/// A waiter for blocking on completion of a posted invocation.
pub struct CompletionWaiter {
    inner: Arc<CompletionState>,
}

impl CompletionWaiter {
    /// Block until the invocation has run.
    pub fn wait(self) {
        let mut done = self.inner.done.lock();
        while !*done {
            self.inner.condvar.wait(&mut done);
        }
    }

    /// Block until the invocation has run or the timeout elapses.
    ///
    /// Returns `true` if the invocation completed.
    pub fn wait_timeout(self, timeout: std::time::Duration) -> bool {
        let mut done = self.inner.done.lock();
        if *done {
            return true;
        }
        let result = self.inner.condvar.wait_for(&mut done, timeout);
        *done || !result.timed_out()
    }

    /// Whether the invocation has already run.
    pub fn is_done(&self) -> bool {
        *self.inner.done.lock()
    }
}

struct CompletionState {
    done: Mutex<bool>,
    condvar: Condvar,
}

fn completion_pair() -> (CompletionHandle, CompletionWaiter) {
    let state = Arc::new(CompletionState {
        done: Mutex::new(false),
        condvar: Condvar::new(),
    });

    (
        CompletionHandle {
            inner: state.clone(),
        },
        CompletionWaiter { inner: state },
    )
}

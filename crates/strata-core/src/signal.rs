//! Signal/slot primitive for observer notifications.
//!
//! Controllers expose their observable events (completed moves, applied
//! snapshots, reported violations) as [`Signal`]s. Slots run synchronously
//! on the emitting context; the engine only emits from its owning context,
//! so no queued delivery is needed.
//!
//! # Example
//!
//! ```
//! use strata_core::Signal;
//!
//! let moved = Signal::<(usize, usize)>::new();
//! let id = moved.connect(|(from, to)| {
//!     println!("moved {from} -> {to}");
//! });
//! moved.emit((0, 3));
//! moved.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked in connection
/// order with a reference to the provided arguments. Slot keys are reused
/// after a disconnect, so each connection also carries a sequence number.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, (u64, Slot<Args>)>>,
    next_sequence: AtomicU64,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            next_sequence: AtomicU64::new(0),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let slot: Slot<Args> = Arc::new(slot);
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        self.connections.lock().insert((sequence, slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// The connection list is copied before any slot runs, so slots may
    /// connect or disconnect on this signal without deadlocking.
    #[tracing::instrument(skip_all, target = "strata_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let mut slots: Vec<(u64, Slot<Args>)> = self.connections.lock().values().cloned().collect();
        slots.sort_unstable_by_key(|(sequence, _)| *sequence);
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for (_, slot) in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_reach_every_slot_in_order() {
        let moved = Signal::<(usize, usize)>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = log.clone();
            moved.connect(move |&(from, to)| log.lock().push(format!("{tag} {from}->{to}")));
        }

        moved.emit((2, 0));
        assert_eq!(*log.lock(), ["first 2->0", "second 2->0"]);
        assert_eq!(moved.connection_count(), 2);
    }

    #[test]
    fn test_disconnected_slot_stops_receiving() {
        let applied = Signal::<usize>::new();
        let sections = Arc::new(Mutex::new(Vec::new()));

        let sink = sections.clone();
        let id = applied.connect(move |&count| sink.lock().push(count));

        applied.emit(3);
        assert!(applied.disconnect(id));
        assert!(!applied.disconnect(id));
        applied.emit(4);

        assert_eq!(*sections.lock(), vec![3]);
        assert_eq!(applied.connection_count(), 0);
    }

    #[test]
    fn test_reconnected_slot_runs_after_older_ones() {
        let moved = Signal::<usize>::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let connect = |tag: &'static str| {
            let log = log.clone();
            moved.connect(move |_| log.lock().push(tag))
        };

        let first = connect("first");
        connect("second");
        moved.disconnect(first);
        connect("third");

        moved.emit(0);
        assert_eq!(*log.lock(), ["second", "third"]);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<()>::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        signal.connect(move |_| *count_clone.lock() += 1);

        signal.set_blocked(true);
        signal.emit(());
        assert_eq!(*count.lock(), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(Mutex::new(0));

        let weak = Arc::downgrade(&signal);
        let calls_clone = calls.clone();
        signal.connect(move |_| {
            *calls_clone.lock() += 1;
            if let Some(signal) = weak.upgrade() {
                signal.disconnect_all();
            }
        });

        signal.emit(());
        signal.emit(());
        assert_eq!(*calls.lock(), 1);
    }
}

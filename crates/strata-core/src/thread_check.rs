//! Thread affinity verification.
//!
//! The update and sizing controllers run on a single logical execution
//! context. They record that context on construction with a
//! [`ThreadAffinity`] and assert it on every public entry point. Work that
//! originates elsewhere must hop over with a
//! [`Poster`](crate::mailbox::Poster) first.
//!
//! # Example
//!
//! ```
//! use strata_core::thread_check::ThreadAffinity;
//!
//! struct Owner {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl Owner {
//!     fn set_value(&self, v: i32) {
//!         self.affinity.debug_assert_same_thread();
//!         self.value.set(v);
//!     }
//! }
//!
//! let owner = Owner { affinity: ThreadAffinity::current(), value: Default::default() };
//! owner.set_value(3);
//! ```

use std::thread::ThreadId;

/// The thread a controller belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// The owning thread.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Whether the calling thread is the owning one.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panic unless called on the owning thread, in every build.
    #[inline]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            self.wrong_thread();
        }
    }

    /// [`assert_same_thread`](Self::assert_same_thread) in debug builds; a
    /// no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn wrong_thread(&self) -> ! {
        let current = std::thread::current();
        panic!(
            "list controller owned by {:?} used from thread '{}' ({:?}); \
             post through the controller's handle() and drain it with process_posted() on the owner",
            self.thread_id,
            current.name().unwrap_or("<unnamed>"),
            current.id(),
        )
    }
}

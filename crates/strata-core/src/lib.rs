//! Core systems for Strata.
//!
//! This crate provides the foundation the list engine is built on:
//!
//! - **Geometry**: sizes, rectangles, insets and the scroll [`Axis`]
//! - **Diagnostics**: the [`Violation`] taxonomy and the [`Checks`] reporter
//! - **Configuration**: [`EngineConfig`], loadable from TOML
//! - **Signals**: [`Signal`] for observer notifications
//! - **Thread affinity**: [`ThreadAffinity`] and the [`Mailbox`] used to hop
//!   work onto the owning context
//! - **Logging**: tracing targets, span names and [`PerfSpan`]
//!
//! # Signal Example
//!
//! ```
//! use strata_core::Signal;
//!
//! let applied = Signal::<usize>::new();
//! let conn_id = applied.connect(|count| {
//!     println!("snapshot with {count} sections applied");
//! });
//! applied.emit(3);
//! applied.disconnect(conn_id);
//! ```
//!
//! # Mailbox Example
//!
//! ```
//! use strata_core::Mailbox;
//!
//! struct Owner { log: Vec<&'static str> }
//!
//! let mailbox = Mailbox::<Owner>::new();
//! let poster = mailbox.poster();
//! std::thread::spawn(move || { poster.post(|o| o.log.push("hello")); })
//!     .join()
//!     .unwrap();
//!
//! let mut owner = Owner { log: Vec::new() };
//! for invocation in mailbox.take_pending() {
//!     invocation.execute(&mut owner);
//! }
//! assert_eq!(owner.log, ["hello"]);
//! ```

pub mod checks;
pub mod config;
mod error;
pub mod geometry;
pub mod logging;
pub mod mailbox;
pub mod signal;
pub mod thread_check;

pub use checks::{CheckMode, Checks};
pub use config::EngineConfig;
pub use error::{ConfigError, ConfigResult, Violation};
pub use geometry::{Axis, Insets, Point, Rect, Size};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use mailbox::{CompletionWaiter, Mailbox, Poster, QueuedInvocation};
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;

static_assertions::assert_impl_all!(Checks: Send, Sync, Clone);
static_assertions::assert_impl_all!(Poster<()>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Signal<Violation>: Send, Sync);

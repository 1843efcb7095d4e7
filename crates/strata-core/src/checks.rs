//! Debug-only invariant checks.
//!
//! Strata never returns an error for a broken list invariant. Instead the
//! engine reports a [`Violation`] through a [`Checks`] reporter and carries on
//! with a conservative fallback. What "reporting" means depends on the
//! [`CheckMode`]:
//!
//! - **Disabled**: the default in release builds. Nothing is validated or
//!   logged; fallbacks still apply.
//! - **Log**: the default in debug builds. Violations are logged at error
//!   level and broadcast on [`Checks::violations`].
//! - **Panic**: like `Log`, then panics. Useful in test suites that must not
//!   tolerate programmer errors.
//!
//! # Example
//!
//! ```
//! use strata_core::checks::{CheckMode, Checks};
//! use strata_core::Violation;
//!
//! let checks = Checks::new(CheckMode::Log);
//! checks.violations().connect(|v| eprintln!("flagged: {v}"));
//! checks.report(Violation::UnknownItem { identifier: "missing".into() });
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Violation;
use crate::logging::targets;
use crate::signal::Signal;

/// How invariant violations are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Skip validation entirely.
    Disabled,
    /// Validate, log and broadcast violations.
    Log,
    /// Validate, log, broadcast, then panic.
    Panic,
}

impl Default for CheckMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Log
        } else {
            Self::Disabled
        }
    }
}

/// A shared violation reporter.
///
/// Cloning a `Checks` shares its broadcast signal, so a controller and the
/// helpers it owns all report into the same stream.
#[derive(Debug, Clone)]
pub struct Checks {
    mode: CheckMode,
    sink: Arc<Signal<Violation>>,
}

impl Default for Checks {
    fn default() -> Self {
        Self::new(CheckMode::default())
    }
}

impl Checks {
    /// Create a reporter with the given mode.
    pub fn new(mode: CheckMode) -> Self {
        Self {
            mode,
            sink: Arc::new(Signal::new()),
        }
    }

    /// The active mode.
    #[inline]
    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    /// Whether validation work should run at all.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.mode != CheckMode::Disabled
    }

    /// Signal emitted for every reported violation.
    pub fn violations(&self) -> &Signal<Violation> {
        &self.sink
    }

    /// Report a violation according to the active mode.
    pub fn report(&self, violation: Violation) {
        match self.mode {
            CheckMode::Disabled => {}
            CheckMode::Log => {
                tracing::error!(target: targets::CHECKS, %violation, "invariant violated");
                self.sink.emit(violation);
            }
            CheckMode::Panic => {
                tracing::error!(target: targets::CHECKS, %violation, "invariant violated");
                let message = violation.to_string();
                self.sink.emit(violation);
                panic!("strata invariant violated: {message}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn missing() -> Violation {
        Violation::UnknownItem {
            identifier: "x".into(),
        }
    }

    #[test]
    fn test_log_mode_broadcasts() {
        let checks = Checks::new(CheckMode::Log);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        checks.violations().connect(move |v| seen_clone.lock().push(v.clone()));

        checks.report(missing());
        assert_eq!(*seen.lock(), vec![missing()]);
    }

    #[test]
    fn test_disabled_mode_is_silent() {
        let checks = Checks::new(CheckMode::Disabled);
        let seen = Arc::new(Mutex::new(0));
        let seen_clone = seen.clone();
        checks.violations().connect(move |_| *seen_clone.lock() += 1);

        assert!(!checks.enabled());
        checks.report(missing());
        assert_eq!(*seen.lock(), 0);
    }

    #[test]
    fn test_clones_share_sink() {
        let checks = Checks::new(CheckMode::Log);
        let clone = checks.clone();
        let seen = Arc::new(Mutex::new(0));
        let seen_clone = seen.clone();
        checks.violations().connect(move |_| *seen_clone.lock() += 1);

        clone.report(missing());
        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    #[should_panic(expected = "strata invariant violated")]
    fn test_panic_mode() {
        Checks::new(CheckMode::Panic).report(missing());
    }
}

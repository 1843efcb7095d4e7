//! Logging and debugging facilities for Strata.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Formatting options for snapshot tree dumps
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Strata uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("strata::update=debug,strata::sizing=trace")
//!         .init();
//! }
//! ```

/// Span names used throughout Strata for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Section measurement span.
    pub const MEASURE_SECTION: &str = "strata::measure_section";
    /// Snapshot application span.
    pub const APPLY_SNAPSHOT: &str = "strata::apply_snapshot";
    /// Filler resolution span.
    pub const RESOLVE_FILLERS: &str = "strata::resolve_fillers";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Invariant check target.
    pub const CHECKS: &str = "strata_core::checks";
    /// Signal target.
    pub const SIGNAL: &str = "strata_core::signal";
    /// Mailbox target.
    pub const MAILBOX: &str = "strata_core::mailbox";
    /// Size controller target.
    pub const SIZING: &str = "strata::sizing";
    /// Update controller target.
    pub const UPDATE: &str = "strata::update";
    /// Renderer registry and template cache target.
    pub const RENDER: &str = "strata::render";
    /// Performance span target.
    pub const PERF: &str = "strata::perf";
}

/// Style options for tree dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// The branch prefix for a non-final child.
    pub fn branch(self) -> &'static str {
        match self {
            Self::Ascii => "+-- ",
            Self::Unicode => "\u{251c}\u{2500}\u{2500} ",
        }
    }

    /// The branch prefix for the final child.
    pub fn last_branch(self) -> &'static str {
        match self {
            Self::Ascii => "`-- ",
            Self::Unicode => "\u{2514}\u{2500}\u{2500} ",
        }
    }

    /// Continuation prefix under a non-final child.
    pub fn continuation(self) -> &'static str {
        match self {
            Self::Ascii => "|   ",
            Self::Unicode => "\u{2502}   ",
        }
    }
}

/// Configuration for tree dumps.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show item kinds.
    pub show_kinds: bool,
    /// Whether to show section constraints.
    pub show_constraints: bool,
    /// Maximum number of items listed per section (None for unlimited).
    pub max_items: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_kinds: true,
            show_constraints: false,
            max_items: None,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_constraints: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            style: TreeStyle::Ascii,
            show_kinds: false,
            show_constraints: false,
            max_items: None,
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

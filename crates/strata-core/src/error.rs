//! Error types for Strata.
//!
//! The engine has no recoverable-error channel for its list operations:
//! broken invariants are [`Violation`]s, reported through
//! [`Checks`](crate::checks::Checks) and followed by a conservative fallback.
//! The only fallible public surface is configuration loading.

/// A broken programmer-facing invariant detected by the engine.
///
/// Violations are diagnostics, never returned to callers. In builds with
/// checks enabled they are logged and broadcast; the engine then degrades
/// to a safe result (skips validation, clamps a size, measures with the
/// template instead).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    /// An item was submitted without an identifier.
    #[error("item {index} in section '{section}' has an empty identifier")]
    EmptyIdentifier { section: String, index: usize },

    /// Two items in one snapshot share an identifier.
    #[error("item identifier '{identifier}' appears more than once in the snapshot")]
    DuplicateIdentifier { identifier: String },

    /// Two sections in one snapshot share an identifier (or one is empty).
    #[error("section identifier '{identifier}' is empty or appears more than once")]
    DuplicateSection { identifier: String },

    /// An operation addressed a location outside the current snapshot.
    #[error("no item at section {section}, index {item}")]
    MissingLocation { section: usize, item: usize },

    /// An operation addressed an identifier that is not in the snapshot.
    #[error("no item with identifier '{identifier}' in the snapshot")]
    UnknownItem { identifier: String },

    /// A relative item was neither the last cell of a fill-last section nor
    /// resolved by a size delegate.
    #[error("relative item '{identifier}' has no size source; measuring with its template")]
    UnresolvedRelativeItem { identifier: String },

    /// No renderer is registered for an item kind that needs measuring.
    #[error("no renderer registered for item kind {kind}")]
    MissingRenderer { kind: &'static str },

    /// A measurement produced a zero or negative dimension.
    #[error("item '{identifier}' measured as {width}x{height}; clamping to minimum")]
    DegenerateSize {
        identifier: String,
        width: f32,
        height: f32,
    },
}

/// Errors produced while loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

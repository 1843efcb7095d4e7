//! Engine configuration.
//!
//! [`EngineConfig`] is a plain value handed to the controllers at
//! construction. It can be built in code or loaded from a TOML document:
//!
//! ```
//! use strata_core::config::EngineConfig;
//! use strata_core::checks::CheckMode;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     checks = "panic"
//!     filler_sizing = true
//! "#).unwrap();
//! assert_eq!(config.checks, CheckMode::Panic);
//! assert_eq!(config.minimum_dimension, 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::checks::CheckMode;
use crate::error::{ConfigError, ConfigResult};

/// Smallest length the engine will ever hand to a host.
pub const DEFAULT_MINIMUM_DIMENSION: f32 = 1.0;

/// Configuration for the sizing and update controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How invariant violations are surfaced.
    pub checks: CheckMode,
    /// Lower bound applied to degenerate measurements and filler sizes.
    pub minimum_dimension: f32,
    /// Resolve relative items by dividing left-over space among them when
    /// no size delegate answers.
    pub filler_sizing: bool,
    /// Whether `remove_item` animates when the caller does not say.
    pub animate_removals: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            checks: CheckMode::default(),
            minimum_dimension: DEFAULT_MINIMUM_DIMENSION,
            filler_sizing: false,
            animate_removals: true,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> String {
        // Every field is a plain scalar; serialization cannot fail.
        toml::to_string(self).unwrap_or_default()
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.minimum_dimension.is_finite() && self.minimum_dimension > 0.0) {
            return Err(ConfigError::invalid_value(
                "minimum_dimension",
                format!("must be a positive length, got {}", self.minimum_dimension),
            ));
        }
        Ok(())
    }

    /// Set the check mode.
    pub fn with_checks(mut self, checks: CheckMode) -> Self {
        self.checks = checks;
        self
    }

    /// Set the minimum dimension, raised to the smallest positive length.
    pub fn with_minimum_dimension(mut self, minimum: f32) -> Self {
        self.minimum_dimension = minimum;
        self.minimum_dimension = self.effective_minimum_dimension();
        self
    }

    /// The minimum dimension the controllers use: always positive, with a
    /// non-finite value replaced by [`DEFAULT_MINIMUM_DIMENSION`].
    pub fn effective_minimum_dimension(&self) -> f32 {
        if self.minimum_dimension.is_finite() {
            self.minimum_dimension.max(f32::EPSILON)
        } else {
            DEFAULT_MINIMUM_DIMENSION
        }
    }

    /// Enable or disable filler sizing.
    pub fn with_filler_sizing(mut self, enabled: bool) -> Self {
        self.filler_sizing = enabled;
        self
    }

    /// Set the default animation for removals.
    pub fn with_animate_removals(mut self, animate: bool) -> Self {
        self.animate_removals = animate;
        self
    }
}

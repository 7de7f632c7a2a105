//! Stack configuration.
//!
//! A [`Stack`](crate::stack::Stack) is generic over its configuration type
//! and never reads it: the value is stored at construction and handed back
//! through `Stack::config()` and to every card being built. `StackConfig`
//! is what [`SignalCard`](crate::cards::SignalCard) follows. Embedders with
//! their own card implementation can use any type instead.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::SpringConfig;

use super::Direction;

/// Default configuration for a stack of throwable cards.
///
/// Every field is interpreted by cards, not by the stack: a
/// [`SignalCard`](crate::cards::SignalCard) refuses throw-outs in
/// directions not listed, judges releases against the confidence
/// threshold, scales throw distance and drag rotation from the limits
/// here, and builds its springs with `spring`.
///
/// ## Example
///
/// ```
/// use swipe_stack::core::{Direction, StackConfig};
///
/// let config = StackConfig::new()
///     .with_allowed_directions([Direction::Left, Direction::Right])
///     .with_throw_out_confidence_threshold(0.8);
///
/// assert!(config.is_allowed(Direction::Left));
/// assert!(!config.is_allowed(Direction::Up));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Directions a card may be thrown out in.
    pub allowed_directions: Vec<Direction>,

    /// Confidence in [0, 1] a release needs before it counts as a throw-out.
    pub throw_out_confidence_threshold: f64,

    /// Distance (px) a thrown-out card travels at the lowest release speed.
    pub min_throw_out_distance: f64,

    /// Distance (px) a thrown-out card travels at the highest release speed.
    pub max_throw_out_distance: f64,

    /// Maximum card rotation (degrees) while dragging.
    pub max_rotation: f64,

    /// Spring used to animate throws and returns.
    pub spring: SpringConfig,
}

impl StackConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Restrict the allowed throw directions.
    #[must_use]
    pub fn with_allowed_directions(mut self, directions: impl IntoIterator<Item = Direction>) -> Self {
        self.allowed_directions.clear();
        for dir in directions {
            if !self.allowed_directions.contains(&dir) {
                self.allowed_directions.push(dir);
            }
        }
        self
    }

    #[must_use]
    pub fn with_throw_out_confidence_threshold(mut self, threshold: f64) -> Self {
        self.throw_out_confidence_threshold = threshold;
        self
    }

    /// Set the throw-out distance range.
    #[must_use]
    pub fn with_throw_out_distance(mut self, min: f64, max: f64) -> Self {
        self.min_throw_out_distance = min;
        self.max_throw_out_distance = max;
        self
    }

    #[must_use]
    pub fn with_max_rotation(mut self, degrees: f64) -> Self {
        self.max_rotation = degrees;
        self
    }

    #[must_use]
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Check if cards may be thrown out in `direction`.
    #[must_use]
    pub fn is_allowed(&self, direction: Direction) -> bool {
        self.allowed_directions.contains(&direction)
    }

    /// Check the configuration for values no card could honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_directions.is_empty() {
            return Err(ConfigError::NoAllowedDirections);
        }
        if !(0.0..=1.0).contains(&self.throw_out_confidence_threshold) {
            return Err(ConfigError::InvalidConfidence(self.throw_out_confidence_threshold));
        }
        if self.min_throw_out_distance > self.max_throw_out_distance {
            return Err(ConfigError::InvalidDistanceRange {
                min: self.min_throw_out_distance,
                max: self.max_throw_out_distance,
            });
        }
        self.spring.validate()?;
        Ok(())
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            allowed_directions: Direction::ALL.to_vec(),
            throw_out_confidence_threshold: 1.0,
            min_throw_out_distance: 400.0,
            max_throw_out_distance: 500.0,
            max_rotation: 20.0,
            spring: SpringConfig::default(),
        }
    }
}

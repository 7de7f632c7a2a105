//! Error types.
//!
//! Lookup misses are never errors: queries return `Option` and stale
//! throw notifications return `false`. Errors are reserved for requests the
//! stack refuses to carry out.

use thiserror::Error;

use crate::core::{CardId, ElementId};

/// Errors raised by [`Stack`](crate::stack::Stack) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// The element already has a card bound to it.
    #[error("{element} already has a card ({existing})")]
    DuplicateCard { element: ElementId, existing: CardId },
}

/// Errors raised by the spring physics engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("frequency must be positive and finite, got {0}")]
    InvalidFrequency(f64),

    #[error("damping ratio must be positive and finite, got {0}")]
    InvalidDampingRatio(f64),

    #[error("time step must be non-negative and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("spring {0} not found")]
    SpringNotFound(u32),
}

/// Errors raised while loading or validating a [`StackConfig`](crate::core::StackConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse stack config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("throw-out confidence threshold must be in [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("min throw-out distance {min} exceeds max {max}")]
    InvalidDistanceRange { min: f64, max: f64 },

    #[error("at least one throw direction must be allowed")]
    NoAllowedDirections,

    #[error(transparent)]
    Spring(#[from] PhysicsError),
}

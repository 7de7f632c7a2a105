//! Default event payload for gesture-driven cards.
//!
//! The stack is generic over the payload type and passes payloads through
//! untouched. `GestureEvent` is what the bundled cards attach: the element
//! the gesture happened on, how far it has moved, and for throws the
//! direction and how confident the card layer is that it was a throw.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, ElementId};

/// Gesture and throw metadata attached to card events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// The element the card is bound to.
    pub target: ElementId,

    /// Direction of the throw, for throw-out and throw-in events.
    pub throw_direction: Option<Direction>,

    /// Confidence in [0, 1] that the release was a throw.
    pub throw_out_confidence: f64,

    /// Horizontal offset from the card's resting position (px).
    pub offset_x: f64,

    /// Vertical offset from the card's resting position (px).
    pub offset_y: f64,
}

impl GestureEvent {
    /// Create an event for `target` at the resting position.
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            throw_direction: None,
            throw_out_confidence: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Set the throw direction (builder pattern).
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.throw_direction = Some(direction);
        self
    }

    /// Set the offset (builder pattern).
    #[must_use]
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the throw-out confidence, clamped to [0, 1] (builder pattern).
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.throw_out_confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

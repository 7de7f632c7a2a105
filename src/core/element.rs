//! Identity tokens for elements and cards.
//!
//! The stack never compares elements or cards structurally. Every UI element
//! the embedder wants to make interactive is named by an [`ElementId`], and
//! every card the stack creates is named by a [`CardId`] it assigns itself.
//!
//! ## Usage
//!
//! ```
//! use swipe_stack::core::{ElementId, CardId};
//!
//! // Embedders pick element IDs (a DOM node index, an ECS entity, ...)
//! let first = ElementId::new(7);
//! let second = ElementId::from(8u64);
//! assert_ne!(first, second);
//!
//! // Card IDs are handed out by the stack
//! let card = CardId::new(0);
//! assert_eq!(card.raw(), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Stable identity of a UI element bound to a card.
///
/// Two `ElementId`s are the same element iff their raw values are equal.
/// The stack does not check that the element is attached to anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Create an element ID from a raw handle value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.0)
    }
}

/// Identity of a card created by a stack.
///
/// IDs are allocated sequentially per stack and never reused, so a
/// destroyed card's ID can't alias a newer card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

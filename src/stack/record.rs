//! Per-card bookkeeping.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardRef;
use crate::core::{CardId, ElementId};
use crate::events::{CardEventKind, ListenerId};

/// Where a card stands in its stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    /// In play. Higher `order` is nearer the top.
    Active { order: u64 },
    /// Thrown out, but still registered.
    ThrownOut,
}

impl CardState {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, CardState::Active { .. })
    }

    /// Position in the active ordering, `None` when thrown out.
    #[must_use]
    pub const fn order(self) -> Option<u64> {
        match self {
            CardState::Active { order } => Some(order),
            CardState::ThrownOut => None,
        }
    }
}

/// A card registered with a stack, together with the element it is bound to.
pub struct CardRecord<K> {
    pub(crate) id: CardId,
    pub(crate) element: ElementId,
    pub(crate) card: Rc<K>,
    pub(crate) state: CardState,
    /// Stack proxies subscribed on the card, one per event kind.
    pub(crate) proxies: SmallVec<[ListenerId; CardEventKind::COUNT]>,
}

impl<K> CardRecord<K> {
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn card(&self) -> &Rc<K> {
        &self.card
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// A shareable handle to this record's card.
    #[must_use]
    pub fn card_ref(&self) -> CardRef<K> {
        CardRef::new(self.id, self.element, Rc::clone(&self.card))
    }
}

impl<K> std::fmt::Debug for CardRecord<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRecord")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("state", &self.state)
            .finish()
    }
}

//! The contract between a stack and the cards it manages.
//!
//! A card is bound to one element and emits [`CardEventKind`] events. How it
//! recognises drags and throws, and how it animates them, is its own
//! business. The stack only needs to build cards and subscribe to them.

use std::ops::Deref;
use std::rc::Rc;

use crate::core::{CardId, ElementId};
use crate::events::{CardEventKind, Listener, ListenerId};
use crate::physics::SpringSystem;

/// A card as seen by the stack.
pub trait Card: 'static {
    /// Payload attached to every event this card emits.
    type Payload: 'static;

    /// Register `listener` for `kind`.
    fn subscribe(&self, kind: CardEventKind, listener: Listener<Self::Payload>) -> ListenerId;

    /// Remove a listener registered through [`Card::subscribe`].
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Called once when the stack destroys this card, after its proxies
    /// are gone. Release whatever the card registered on shared resources.
    fn detach(&self) {}
}

/// What a card gets to see of its stack while being built.
///
/// Carries the stack's configuration, its shared physics engine and the ID
/// the stack assigned to the new card.
pub struct CardContext<'a, C> {
    config: &'a C,
    physics: &'a Rc<SpringSystem>,
    card_id: CardId,
}

impl<'a, C> CardContext<'a, C> {
    pub(crate) fn new(config: &'a C, physics: &'a Rc<SpringSystem>, card_id: CardId) -> Self {
        Self {
            config,
            physics,
            card_id,
        }
    }

    /// The stack's configuration.
    #[must_use]
    pub fn config(&self) -> &'a C {
        self.config
    }

    /// The stack's physics engine. Every card of a stack gets the same one.
    #[must_use]
    pub fn physics(&self) -> &'a Rc<SpringSystem> {
        self.physics
    }

    /// ID the stack assigned to the card being built.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card_id
    }
}

/// Builds cards on behalf of a stack configured with `C`.
///
/// Closures taking `(CardContext<'_, C>, ElementId)` are factories too.
pub trait CardFactory<C> {
    type Card: Card;

    /// Build a card bound to `element`.
    fn build(&mut self, ctx: CardContext<'_, C>, element: ElementId) -> Self::Card;
}

impl<C, K, F> CardFactory<C> for F
where
    K: Card,
    F: FnMut(CardContext<'_, C>, ElementId) -> K,
{
    type Card = K;

    fn build(&mut self, ctx: CardContext<'_, C>, element: ElementId) -> K {
        self(ctx, element)
    }
}

/// Shared handle to a card owned by a stack.
///
/// Equality is identity: two handles are equal iff they point at the same
/// card instance.
pub struct CardRef<K> {
    id: CardId,
    element: ElementId,
    card: Rc<K>,
}

impl<K> CardRef<K> {
    pub(crate) fn new(id: CardId, element: ElementId, card: Rc<K>) -> Self {
        Self { id, element, card }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The element this card is bound to.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The shared card instance.
    #[must_use]
    pub fn rc(&self) -> &Rc<K> {
        &self.card
    }

    /// Check if both handles refer to the same card instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.card, &other.card)
    }
}

impl<K> Clone for CardRef<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            element: self.element,
            card: Rc::clone(&self.card),
        }
    }
}

impl<K> Deref for CardRef<K> {
    type Target = K;

    fn deref(&self) -> &K {
        &self.card
    }
}

impl<K> PartialEq for CardRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.ptr_eq(other)
    }
}

impl<K> Eq for CardRef<K> {}

impl<K> std::fmt::Debug for CardRef<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRef")
            .field("id", &self.id)
            .field("element", &self.element)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ref_identity() {
        let a = CardRef::new(CardId::new(0), ElementId::new(1), Rc::new(5u8));
        let same = a.clone();
        let twin = CardRef::new(CardId::new(0), ElementId::new(1), Rc::new(5u8));

        assert_eq!(a, same);
        assert!(a.ptr_eq(&same));
        // Equal contents, different instance.
        assert_ne!(a, twin);
        assert_eq!(*a, *twin);
    }

    #[test]
    fn test_context_accessors() {
        let physics = Rc::new(SpringSystem::new());
        let config = "cfg";
        let ctx = CardContext::new(&config, &physics, CardId::new(3));

        assert_eq!(*ctx.config(), "cfg");
        assert!(Rc::ptr_eq(ctx.physics(), &physics));
        assert_eq!(ctx.card_id(), CardId::new(3));
    }
}

//! The card registry.
//!
//! `Stack` is the single owner of card membership, the active ordering, the
//! shared physics engine and the public event channel.
//!
//! Membership and ordering live in one collection: each [`CardRecord`]
//! carries its own [`CardState`], and an active card's `order` is a
//! sequence number stamped when it last became active. The top card is the
//! active record with the greatest order, so there is no second list to
//! keep in sync.

use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::cards::{Card, CardContext, CardFactory, CardRef};
use crate::core::{CardId, ElementId};
use crate::error::StackError;
use crate::events::{CardEventKind, EventBus, Listener, ListenerId};
use crate::physics::SpringSystem;

use super::record::{CardRecord, CardState};

/// Payload type of the cards built by `F`.
pub type PayloadOf<C, F> = <<F as CardFactory<C>>::Card as Card>::Payload;

/// A stack of throwable cards.
///
/// `C` is the configuration, stored and handed back untouched. `F` builds
/// the card for each element.
///
/// ## Example
///
/// ```
/// use swipe_stack::cards::SignalCardFactory;
/// use swipe_stack::core::{ElementId, StackConfig};
/// use swipe_stack::events::GestureEvent;
/// use swipe_stack::stack::Stack;
///
/// let mut stack = Stack::new(StackConfig::default(), SignalCardFactory::<GestureEvent>::new());
///
/// let a = stack.create_card(ElementId::new(1)).unwrap();
/// let b = stack.create_card(ElementId::new(2)).unwrap();
/// assert_eq!(stack.top_card(), Some(b.clone()));
///
/// // The card layer reports a throw-out: A is on top again.
/// stack.on_card_thrown_out(b.id());
/// assert_eq!(stack.top_card(), Some(a));
///
/// // B is still registered until destroyed.
/// assert_eq!(stack.card(ElementId::new(2)), Some(b));
/// ```
pub struct Stack<C, F: CardFactory<C>> {
    config: C,
    factory: F,
    physics: Rc<SpringSystem>,
    events: Rc<EventBus<PayloadOf<C, F>>>,
    /// Membership in creation order.
    records: Vec<CardRecord<F::Card>>,
    next_card_id: u64,
    next_order: u64,
}

impl<C, F: CardFactory<C>> Stack<C, F> {
    /// Create an empty stack with its own physics engine and event bus.
    pub fn new(config: C, factory: F) -> Self {
        Self {
            config,
            factory,
            physics: Rc::new(SpringSystem::new()),
            events: Rc::new(EventBus::new()),
            records: Vec::new(),
            next_card_id: 0,
            next_order: 0,
        }
    }

    /// The configuration this stack was created with.
    #[must_use]
    pub fn config(&self) -> &C {
        &self.config
    }

    /// The physics engine shared by every card of this stack.
    #[must_use]
    pub fn physics(&self) -> &Rc<SpringSystem> {
        &self.physics
    }

    /// Listen for `kind` events from any card of this stack.
    pub fn subscribe(
        &self,
        kind: CardEventKind,
        listener: impl Fn(&PayloadOf<C, F>) + 'static,
    ) -> ListenerId {
        self.events.subscribe(kind, listener)
    }

    /// Remove a listener registered through [`Stack::subscribe`].
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Number of stack-level listeners for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: CardEventKind) -> usize {
        self.events.listener_count(kind)
    }

    /// Create a card bound to `element` and put it on top of the stack.
    ///
    /// Every event of the new card is republished on this stack under the
    /// same kind, with the same payload.
    ///
    /// Fails with [`StackError::DuplicateCard`] if `element` already has a
    /// card; the stack is left unchanged and the factory is not called.
    pub fn create_card(&mut self, element: ElementId) -> Result<CardRef<F::Card>, StackError> {
        if let Some(existing) = self.record_for_element(element) {
            warn!("refusing to create a second card for {} (bound to {})", element, existing.id);
            return Err(StackError::DuplicateCard {
                element,
                existing: existing.id,
            });
        }

        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;

        let ctx = CardContext::new(&self.config, &self.physics, id);
        let card = Rc::new(self.factory.build(ctx, element));

        let proxies = CardEventKind::ALL
            .into_iter()
            .map(|kind| card.subscribe(kind, proxy(Rc::downgrade(&self.events), kind)))
            .collect();

        let order = self.bump_order();
        self.records.push(CardRecord {
            id,
            element,
            card: Rc::clone(&card),
            state: CardState::Active { order },
            proxies,
        });

        debug!("created {} for {} (order {})", id, element, order);
        Ok(CardRef::new(id, element, card))
    }

    /// The card bound to `element`, if any.
    #[must_use]
    pub fn card(&self, element: ElementId) -> Option<CardRef<F::Card>> {
        self.record_for_element(element).map(CardRecord::card_ref)
    }

    /// The card with ID `id`, if it is still registered.
    #[must_use]
    pub fn card_by_id(&self, id: CardId) -> Option<CardRef<F::Card>> {
        self.record(id).map(CardRecord::card_ref)
    }

    /// The most recently created or thrown-in card still in play.
    #[must_use]
    pub fn top_card(&self) -> Option<CardRef<F::Card>> {
        self.records
            .iter()
            .filter_map(|r| r.state.order().map(|order| (order, r)))
            .max_by_key(|(order, _)| *order)
            .map(|(_, r)| r.card_ref())
    }

    /// Record that `id` was thrown out.
    ///
    /// The card stays registered. Returns `false` (and changes nothing) if
    /// the card is unknown or already thrown out, which happens when a
    /// gesture end fires twice.
    pub fn on_card_thrown_out(&mut self, id: CardId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) if record.is_active() => {
                record.state = CardState::ThrownOut;
                debug!("{} thrown out", id);
                true
            }
            Some(_) => {
                debug!("ignoring throw-out of {}: already thrown out", id);
                false
            }
            None => {
                debug!("ignoring throw-out of {}: not in this stack", id);
                false
            }
        }
    }

    /// Record that `id` was thrown back in; it becomes the top card.
    ///
    /// A card that is already in play is moved to the top rather than
    /// listed twice. Returns `false` if the card is not registered; a
    /// destroyed card can't come back.
    pub fn on_card_thrown_in(&mut self, id: CardId) -> bool {
        let Some(pos) = self.position(id) else {
            debug!("ignoring throw-in of {}: not in this stack", id);
            return false;
        };

        if self.records[pos].is_active() {
            debug!("{} thrown in while already in play; moving it to the top", id);
        }
        let order = self.bump_order();
        self.records[pos].state = CardState::Active { order };
        debug!("{} thrown in (order {})", id, order);
        true
    }

    /// Forget `id` for good.
    ///
    /// Removes the card from membership and from the active ordering, and
    /// detaches the stack's proxies from it so its later events no longer
    /// reach stack listeners. The card then gets [`Card::detach`] to
    /// release what it holds on the shared physics engine. Returns the
    /// removed record, or `None` if no card matched.
    pub fn destroy_card(&mut self, id: CardId) -> Option<CardRecord<F::Card>> {
        let Some(pos) = self.position(id) else {
            debug!("nothing to destroy for {}", id);
            return None;
        };

        let record = self.records.remove(pos);
        for proxy_id in &record.proxies {
            record.card.unsubscribe(*proxy_id);
        }
        record.card.detach();

        debug!("destroyed {} (was bound to {})", id, record.element);
        Some(record)
    }

    /// Current state of `id`, `None` once destroyed.
    #[must_use]
    pub fn state(&self, id: CardId) -> Option<CardState> {
        self.record(id).map(CardRecord::state)
    }

    #[must_use]
    pub fn is_active(&self, id: CardId) -> bool {
        self.state(id).is_some_and(CardState::is_active)
    }

    #[must_use]
    pub fn contains_element(&self, element: ElementId) -> bool {
        self.record_for_element(element).is_some()
    }

    /// Number of registered cards, thrown out or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of cards still in play.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.records.iter().filter(|r| r.is_active()).count()
    }

    /// All registered cards, in creation order.
    pub fn cards(&self) -> impl Iterator<Item = &CardRecord<F::Card>> {
        self.records.iter()
    }

    /// Cards in play, bottom to top.
    #[must_use]
    pub fn active_cards(&self) -> Vec<CardRef<F::Card>> {
        let mut active: Vec<_> = self
            .records
            .iter()
            .filter_map(|r| r.state.order().map(|order| (order, r)))
            .collect();
        active.sort_unstable_by_key(|(order, _)| *order);
        active.into_iter().map(|(_, r)| r.card_ref()).collect()
    }

    /// Thrown-out cards, in creation order.
    pub fn thrown_out_cards(&self) -> impl Iterator<Item = CardRef<F::Card>> + '_ {
        self.records
            .iter()
            .filter(|r| !r.is_active())
            .map(CardRecord::card_ref)
    }

    fn record(&self, id: CardId) -> Option<&CardRecord<F::Card>> {
        self.records.iter().find(|r| r.id == id)
    }

    fn record_for_element(&self, element: ElementId) -> Option<&CardRecord<F::Card>> {
        self.records.iter().find(|r| r.element == element)
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn bump_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}

/// Listener that republishes a card event on the stack's bus.
///
/// Holds the bus weakly: once the stack is dropped the proxy does nothing.
fn proxy<P: 'static>(bus: Weak<EventBus<P>>, kind: CardEventKind) -> Listener<P> {
    Rc::new(move |payload: &P| {
        if let Some(bus) = bus.upgrade() {
            let delivered = bus.publish(kind, payload);
            trace!("proxied `{}` to {} stack listener(s)", kind, delivered);
        }
    })
}

impl<C: std::fmt::Debug, F: CardFactory<C>> std::fmt::Debug for Stack<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("config", &self.config)
            .field("records", &self.records)
            .field("physics", &self.physics)
            .finish()
    }
}

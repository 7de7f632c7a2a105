//! A card whose events are emitted by the embedding code.
//!
//! `SignalCard` has no gesture recognition of its own. It suits hosts that
//! already track pointers (a game loop, a test harness) and only need the
//! card to fan events out to the stack. The throw rules of its
//! [`StackConfig`] still apply: throw-outs in a direction the configuration
//! doesn't allow are refused, and the distance, rotation and spring helpers
//! read their tuning from it.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use log::debug;
use smallvec::SmallVec;

use crate::core::{CardId, Direction, ElementId, StackConfig};
use crate::error::PhysicsError;
use crate::events::{CardEventKind, EventBus, Listener, ListenerId};
use crate::physics::{SpringId, SpringListenerId, SpringSystem};

use super::card::{Card, CardContext, CardFactory};

/// Vertical offset (px) at which the drag rotation reaches full tilt.
const ROTATION_VERTICAL_RANGE: f64 = 100.0;

/// Card that publishes whatever the host tells it to.
pub struct SignalCard<P> {
    id: CardId,
    element: ElementId,
    config: StackConfig,
    events: EventBus<P>,
    physics: Rc<SpringSystem>,
    springs: RefCell<SmallVec<[SpringId; 2]>>,
    spring_listeners: RefCell<SmallVec<[SpringListenerId; 2]>>,
}

impl<P: 'static> SignalCard<P> {
    /// Build a card for `element` from a stack's card context, following
    /// the throw rules in `config`.
    pub fn new<C>(ctx: &CardContext<'_, C>, config: StackConfig, element: ElementId) -> Self {
        Self {
            id: ctx.card_id(),
            element,
            config,
            events: EventBus::new(),
            physics: Rc::clone(ctx.physics()),
            springs: RefCell::default(),
            spring_listeners: RefCell::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The throw rules this card follows.
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Physics engine shared with the rest of the stack.
    #[must_use]
    pub fn physics(&self) -> &Rc<SpringSystem> {
        &self.physics
    }

    /// Publish `kind` to this card's listeners. Returns how many ran.
    ///
    /// A directional throw-out in a direction the configuration doesn't
    /// allow is dropped.
    pub fn emit(&self, kind: CardEventKind, payload: &P) -> usize {
        if kind.direction().is_some_and(|dir| !self.config.is_allowed(dir)) {
            debug!("{} dropped `{}`: direction not allowed", self.id, kind);
            return 0;
        }
        self.events.publish(kind, payload)
    }

    /// Emit `throwout` followed by the directional throw-out event.
    ///
    /// Returns `false`, emitting nothing, if `direction` is not allowed.
    pub fn emit_throw_out(&self, direction: Direction, payload: &P) -> bool {
        if !self.config.is_allowed(direction) {
            debug!("{} refused a throw-out to the {}", self.id, direction);
            return false;
        }
        self.emit(CardEventKind::ThrowOut, payload);
        self.emit(CardEventKind::throw_out(direction), payload);
        true
    }

    /// Check if a release with `confidence` counts as a throw-out.
    #[must_use]
    pub fn is_throw_out(&self, confidence: f64) -> bool {
        confidence >= self.config.throw_out_confidence_threshold
    }

    /// How far a thrown-out card travels, scaled between the configured
    /// minimum and maximum by the release confidence.
    #[must_use]
    pub fn throw_out_distance(&self, confidence: f64) -> f64 {
        let min = self.config.min_throw_out_distance;
        let max = self.config.max_throw_out_distance;
        min + (max - min) * confidence.clamp(0.0, 1.0)
    }

    /// Tilt in degrees for a card dragged to `(offset_x, offset_y)`.
    ///
    /// Grows with the horizontal offset relative to `width` and flips sign
    /// with the vertical offset, bounded by the configured maximum.
    #[must_use]
    pub fn rotation(&self, offset_x: f64, offset_y: f64, width: f64) -> f64 {
        if width <= 0.0 {
            return 0.0;
        }
        let horizontal = (offset_x / width).clamp(-1.0, 1.0);
        let vertical = offset_y.signum() * (offset_y.abs() / ROTATION_VERTICAL_RANGE).min(1.0);
        horizontal * vertical * self.config.max_rotation
    }

    /// Create a spring with the configured tuning, owned by this card.
    ///
    /// The spring is destroyed when the stack destroys the card.
    pub fn create_spring(&self, initial: f64) -> Result<SpringId, PhysicsError> {
        let id = self.physics.create_spring(self.config.spring, initial)?;
        self.springs.borrow_mut().push(id);
        Ok(id)
    }

    /// Follow spring updates for as long as this card is in its stack.
    pub fn on_spring_update(&self, listener: impl Fn(SpringId, f64) + 'static) -> SpringListenerId {
        let id = self.physics.on_update(listener);
        self.spring_listeners.borrow_mut().push(id);
        id
    }

    /// Number of listeners on `kind`, the stack's proxy included.
    #[must_use]
    pub fn listener_count(&self, kind: CardEventKind) -> usize {
        self.events.listener_count(kind)
    }
}

impl<P: 'static> Card for SignalCard<P> {
    type Payload = P;

    fn subscribe(&self, kind: CardEventKind, listener: Listener<P>) -> ListenerId {
        self.events.subscribe_rc(kind, listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    fn detach(&self) {
        let listeners = std::mem::take(&mut *self.spring_listeners.borrow_mut());
        for id in &listeners {
            self.physics.remove_listener(*id);
        }
        let springs = std::mem::take(&mut *self.springs.borrow_mut());
        for id in &springs {
            self.physics.destroy_spring(*id);
        }
        debug!(
            "{} released {} spring(s) and {} spring listener(s)",
            self.id,
            springs.len(),
            listeners.len()
        );
    }
}

impl<P> std::fmt::Debug for SignalCard<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalCard")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("events", &self.events)
            .field("springs", &self.springs.borrow().len())
            .finish()
    }
}

/// Factory producing [`SignalCard`]s for stacks configured with
/// [`StackConfig`]. Each card gets its own copy of the configuration.
pub struct SignalCardFactory<P> {
    _payload: PhantomData<fn(&P)>,
}

impl<P> SignalCardFactory<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _payload: PhantomData,
        }
    }
}

impl<P> Default for SignalCardFactory<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for SignalCardFactory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SignalCardFactory")
    }
}

impl<P: 'static> CardFactory<StackConfig> for SignalCardFactory<P> {
    type Card = SignalCard<P>;

    fn build(&mut self, ctx: CardContext<'_, StackConfig>, element: ElementId) -> SignalCard<P> {
        SignalCard::new(&ctx, ctx.config().clone(), element)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::physics::{DampingMode, SpringConfig};

    fn card_with(config: StackConfig) -> SignalCard<&'static str> {
        let physics = Rc::new(SpringSystem::new());
        let ctx = CardContext::new(&config, &physics, CardId::new(4));
        SignalCardFactory::new().build(ctx, ElementId::new(40))
    }

    fn card() -> SignalCard<&'static str> {
        card_with(StackConfig::default())
    }

    fn record_all(card: &SignalCard<&'static str>) -> Rc<RefCell<Vec<(CardEventKind, &'static str)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        for kind in CardEventKind::ALL {
            let sink = Rc::clone(&seen);
            card.subscribe(kind, Rc::new(move |p: &&'static str| sink.borrow_mut().push((kind, *p))));
        }
        seen
    }

    #[test]
    fn test_built_from_context() {
        let card = card_with(StackConfig::new().with_max_rotation(9.0));
        assert_eq!(card.id(), CardId::new(4));
        assert_eq!(card.element(), ElementId::new(40));
        assert_eq!(card.config().max_rotation, 9.0);
    }

    #[test]
    fn test_emit_throw_out_sends_both_events() {
        let card = card();
        let seen = record_all(&card);

        assert!(card.emit_throw_out(Direction::Up, &"flick"));
        assert_eq!(
            *seen.borrow(),
            vec![
                (CardEventKind::ThrowOut, "flick"),
                (CardEventKind::ThrowOutUp, "flick"),
            ]
        );
    }

    #[test]
    fn test_disallowed_direction_refused() {
        let card = card_with(
            StackConfig::new().with_allowed_directions([Direction::Left, Direction::Right]),
        );
        let seen = record_all(&card);

        assert!(!card.emit_throw_out(Direction::Up, &"flick"));
        assert_eq!(card.emit(CardEventKind::ThrowOutDown, &"flick"), 0);
        assert!(seen.borrow().is_empty());

        assert!(card.emit_throw_out(Direction::Left, &"flick"));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_confidence_threshold() {
        let strict = card();
        assert!(!strict.is_throw_out(0.99));
        assert!(strict.is_throw_out(1.0));

        let lenient = card_with(StackConfig::new().with_throw_out_confidence_threshold(0.5));
        assert!(!lenient.is_throw_out(0.4));
        assert!(lenient.is_throw_out(0.5));
    }

    #[test]
    fn test_throw_out_distance_scales_with_confidence() {
        let card = card_with(StackConfig::new().with_throw_out_distance(300.0, 600.0));
        assert_eq!(card.throw_out_distance(0.0), 300.0);
        assert_eq!(card.throw_out_distance(0.5), 450.0);
        assert_eq!(card.throw_out_distance(1.0), 600.0);
        assert_eq!(card.throw_out_distance(7.0), 600.0);
    }

    #[test]
    fn test_rotation() {
        let card = card_with(StackConfig::new().with_max_rotation(20.0));
        assert_eq!(card.rotation(0.0, 50.0, 200.0), 0.0);
        assert_eq!(card.rotation(100.0, 100.0, 200.0), 10.0);
        assert_eq!(card.rotation(100.0, -100.0, 200.0), -10.0);
        // Saturates past the card width and the vertical range.
        assert_eq!(card.rotation(-900.0, 400.0, 200.0), -20.0);
        assert_eq!(card.rotation(100.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn test_springs_use_configured_tuning() {
        let tuning = SpringConfig::new(4.0, 0.5).unwrap();
        let card = card_with(StackConfig::new().with_spring(tuning));

        let x = card.create_spring(12.0).unwrap();
        assert_eq!(card.physics().value(x), Some(12.0));
        let mode = card.physics().with_spring(x, |s| s.mode()).unwrap();
        assert_eq!(mode, DampingMode::Underdamped);
    }

    #[test]
    fn test_detach_releases_physics() {
        let card = card();
        let x = card.create_spring(0.0).unwrap();
        card.physics().set_end_value(x, 50.0).unwrap();

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        card.on_spring_update(move |_, _| counter.set(counter.get() + 1));
        card.physics().step(1.0 / 60.0).unwrap();
        assert_eq!(calls.get(), 1);

        card.detach();
        assert_eq!(card.physics().spring_count(), 0);
        assert_eq!(card.physics().listener_count(), 0);

        let other = card.physics().create_spring(SpringConfig::default(), 0.0).unwrap();
        card.physics().set_end_value(other, 5.0).unwrap();
        card.physics().step(1.0 / 60.0).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let card = card();
        let id = card.subscribe(CardEventKind::DragStart, Rc::new(|_: &&'static str| {}));
        assert_eq!(card.listener_count(CardEventKind::DragStart), 1);
        assert!(card.unsubscribe(id));
        assert_eq!(card.emit(CardEventKind::DragStart, &"x"), 0);
    }
}

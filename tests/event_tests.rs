//! Event proxy integration tests.
//!
//! Cards emit events on their own bus; the stack must republish each one,
//! unchanged, to its own listeners.

use std::cell::RefCell;
use std::rc::Rc;

use swipe_stack::cards::SignalCardFactory;
use swipe_stack::core::{Direction, ElementId, StackConfig};
use swipe_stack::events::{CardEventKind, GestureEvent};
use swipe_stack::stack::Stack;

type GestureStack = Stack<StackConfig, SignalCardFactory<GestureEvent>>;

fn stack() -> GestureStack {
    let _ = env_logger::builder().is_test(true).try_init();
    Stack::new(StackConfig::default(), SignalCardFactory::new())
}

/// Collects `(listener, kind, payload address)` triples.
type Log = Rc<RefCell<Vec<(&'static str, CardEventKind, usize)>>>;

fn listen(stack: &GestureStack, log: &Log, name: &'static str, kind: CardEventKind) {
    let log = Rc::clone(log);
    stack.subscribe(kind, move |payload: &GestureEvent| {
        log.borrow_mut()
            .push((name, kind, payload as *const GestureEvent as usize));
    });
}

// =============================================================================
// Proxy fidelity
// =============================================================================

/// Each of the eleven events reaches every stack listener exactly once,
/// with the very payload object the card emitted.
#[test]
fn test_every_event_proxied_once_with_identical_payload() {
    let mut stack = stack();
    let log: Log = Rc::default();

    for kind in CardEventKind::ALL {
        listen(&stack, &log, "first", kind);
        listen(&stack, &log, "second", kind);
    }

    let card = stack.create_card(ElementId::new(1)).unwrap();

    for kind in CardEventKind::ALL {
        log.borrow_mut().clear();
        let payload = GestureEvent::new(card.element()).with_offset(3.0, 4.0);
        let address = &payload as *const GestureEvent as usize;

        card.emit(kind, &payload);

        assert_eq!(
            *log.borrow(),
            vec![("first", kind, address), ("second", kind, address)],
            "event `{}` was not proxied faithfully",
            kind
        );
    }
}

/// Listeners for one kind don't hear other kinds.
#[test]
fn test_events_routed_by_kind() {
    let mut stack = stack();
    let log: Log = Rc::default();
    listen(&stack, &log, "drag", CardEventKind::DragMove);

    let card = stack.create_card(ElementId::new(1)).unwrap();
    let payload = GestureEvent::new(card.element());
    card.emit(CardEventKind::DragStart, &payload);
    card.emit(CardEventKind::DragEnd, &payload);
    assert!(log.borrow().is_empty());

    card.emit(CardEventKind::DragMove, &payload);
    assert_eq!(log.borrow().len(), 1);
}

/// Payloads from different cards keep their own contents.
#[test]
fn test_payloads_from_several_cards() {
    let mut stack = stack();
    let targets = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&targets);
    stack.subscribe(CardEventKind::ThrowOut, move |e: &GestureEvent| {
        sink.borrow_mut().push((e.target, e.throw_direction));
    });

    let a = stack.create_card(ElementId::new(10)).unwrap();
    let b = stack.create_card(ElementId::new(20)).unwrap();

    b.emit_throw_out(
        Direction::Right,
        &GestureEvent::new(b.element()).with_direction(Direction::Right),
    );
    a.emit_throw_out(
        Direction::Left,
        &GestureEvent::new(a.element()).with_direction(Direction::Left),
    );

    assert_eq!(
        *targets.borrow(),
        vec![
            (ElementId::new(20), Some(Direction::Right)),
            (ElementId::new(10), Some(Direction::Left)),
        ]
    );
}

/// A listener subscribed after the card was created still hears it.
#[test]
fn test_late_subscription() {
    let mut stack = stack();
    let card = stack.create_card(ElementId::new(1)).unwrap();

    let log: Log = Rc::default();
    listen(&stack, &log, "late", CardEventKind::ThrowIn);

    card.emit(CardEventKind::ThrowIn, &GestureEvent::new(card.element()));
    assert_eq!(log.borrow().len(), 1);
}

/// Directional throw-outs arrive as `throwout` then the directional event.
#[test]
fn test_directional_throw_out_sequence() {
    let mut stack = stack();
    let log: Log = Rc::default();
    for kind in CardEventKind::ALL {
        listen(&stack, &log, "any", kind);
    }

    let card = stack.create_card(ElementId::new(1)).unwrap();
    card.emit_throw_out(Direction::Down, &GestureEvent::new(card.element()));

    let kinds: Vec<_> = log.borrow().iter().map(|(_, kind, _)| *kind).collect();
    assert_eq!(kinds, vec![CardEventKind::ThrowOut, CardEventKind::ThrowOutDown]);
}

// =============================================================================
// Subscription management
// =============================================================================

#[test]
fn test_unsubscribe_from_stack() {
    let mut stack = stack();
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let id = stack.subscribe(CardEventKind::DragEnd, move |_| {
        sink.borrow_mut().push(("gone", CardEventKind::DragEnd, 0));
    });
    assert_eq!(stack.listener_count(CardEventKind::DragEnd), 1);

    assert!(stack.unsubscribe(id));
    assert_eq!(stack.listener_count(CardEventKind::DragEnd), 0);

    let card = stack.create_card(ElementId::new(1)).unwrap();
    card.emit(CardEventKind::DragEnd, &GestureEvent::new(card.element()));
    assert!(log.borrow().is_empty());
}

/// Events from a destroyed card no longer reach the stack.
#[test]
fn test_destroyed_card_is_not_proxied() {
    let mut stack = stack();
    let log: Log = Rc::default();
    listen(&stack, &log, "stack", CardEventKind::DragStart);

    let card = stack.create_card(ElementId::new(1)).unwrap();
    stack.destroy_card(card.id());

    // The host still holds the card and can emit on it.
    let delivered = card.emit(CardEventKind::DragStart, &GestureEvent::new(card.element()));
    assert_eq!(delivered, 0);
    assert!(log.borrow().is_empty());
}

/// Thrown-out cards keep proxying: their throw-in must still be heard.
#[test]
fn test_thrown_out_card_still_proxied() {
    let mut stack = stack();
    let log: Log = Rc::default();
    listen(&stack, &log, "stack", CardEventKind::ThrowIn);

    let card = stack.create_card(ElementId::new(1)).unwrap();
    stack.on_card_thrown_out(card.id());

    card.emit(CardEventKind::ThrowIn, &GestureEvent::new(card.element()));
    assert_eq!(log.borrow().len(), 1);
}

/// Dropping the stack leaves surviving cards harmless.
#[test]
fn test_dropped_stack_makes_proxies_inert() {
    let log: Log = Rc::default();
    let card = {
        let mut stack = stack();
        listen(&stack, &log, "stack", CardEventKind::DragMove);
        stack.create_card(ElementId::new(1)).unwrap()
    };

    // The proxy is still subscribed on the card but has nowhere to publish.
    assert_eq!(card.listener_count(CardEventKind::DragMove), 1);
    card.emit(CardEventKind::DragMove, &GestureEvent::new(card.element()));
    assert!(log.borrow().is_empty());
}

/// A panicking stack listener doesn't starve the ones after it.
#[test]
fn test_panicking_listener_isolated() {
    let mut stack = stack();
    stack.subscribe(CardEventKind::ThrowOutEnd, |_| panic!("listener failure"));
    let log: Log = Rc::default();
    listen(&stack, &log, "after", CardEventKind::ThrowOutEnd);

    let card = stack.create_card(ElementId::new(1)).unwrap();
    card.emit(CardEventKind::ThrowOutEnd, &GestureEvent::new(card.element()));
    assert_eq!(log.borrow().len(), 1);
}

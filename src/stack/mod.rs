//! The stack: card registry and ordering.
//!
//! A [`Stack`] tracks which elements have cards, which cards are still in
//! play, and which one is on top. It republishes every card's events on
//! its own bus and owns the physics engine its cards animate with.
//!
//! ## Card lifecycle
//!
//! ```text
//!              create_card
//!                  │
//!                  ▼
//!   ┌──────────► Active ──── on_card_thrown_out ───► ThrownOut
//!   │              │                                    │
//!   └──────────────┼──────── on_card_thrown_in ─────────┘
//!                  │                                    │
//!                  └──────────► destroy_card ◄──────────┘
//!                                    │
//!                                    ▼
//!                                Destroyed (terminal)
//! ```
//!
//! The stack never changes a card's state on its own. The card layer
//! reports throw-outs and throw-ins; the stack only keeps the books.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use swipe_stack::cards::SignalCardFactory;
//! use swipe_stack::core::{Direction, ElementId, StackConfig};
//! use swipe_stack::events::{CardEventKind, GestureEvent};
//! use swipe_stack::stack::Stack;
//!
//! let mut stack = Stack::new(StackConfig::default(), SignalCardFactory::<GestureEvent>::new());
//!
//! // Stack-level listener: hears throw-outs from every card.
//! let thrown = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&thrown);
//! stack.subscribe(CardEventKind::ThrowOutLeft, move |_| counter.set(counter.get() + 1));
//!
//! let card = stack.create_card(ElementId::new(1)).unwrap();
//!
//! // The card layer recognises a throw and emits it...
//! let event = GestureEvent::new(card.element()).with_direction(Direction::Left);
//! card.emit_throw_out(Direction::Left, &event);
//! // ...then reports it to the stack.
//! stack.on_card_thrown_out(card.id());
//!
//! assert_eq!(thrown.get(), 1);
//! assert!(stack.top_card().is_none());
//! ```

mod record;
mod registry;

pub use record::{CardRecord, CardState};
pub use registry::{PayloadOf, Stack};

//! Card events and the bus that carries them.
//!
//! ## Key Components
//!
//! - [`CardEventKind`]: The eleven events a card emits
//! - [`EventBus`]: Per-kind listener lists with synchronous, ordered delivery
//! - [`GestureEvent`]: Default payload attached by the bundled cards
//!
//! ## Design Philosophy
//!
//! The set of events is closed, so it is an enum rather than a string-keyed
//! table: a typo in an event name is a compile error, and the stack can
//! prove it proxies every event by iterating [`CardEventKind::ALL`].
//! Payloads stay generic; the stack never looks inside them.

mod bus;
mod kind;
mod payload;

pub use bus::{EventBus, Listener, ListenerId};
pub use kind::{CardEventKind, UnknownEvent};
pub use payload::GestureEvent;

//! # swipe-stack
//!
//! Card registry and ordering for swipe-card interfaces.
//!
//! A [`Stack`] keeps track of the cards bound to UI elements, which of them
//! are still in play, and which one is on top. Cards emit drag and throw
//! events; the stack republishes all of them on one channel so the
//! application subscribes once instead of once per card. Every card of a
//! stack animates with the same [`SpringSystem`].
//!
//! ## Design Principles
//!
//! 1. **Identity, not structure**: Elements and cards are named by
//!    [`ElementId`] and [`CardId`] tokens. Nothing is compared by value.
//!
//! 2. **One source of truth**: Membership and the active ordering are a
//!    single collection of records with an explicit state, so they can't
//!    drift apart.
//!
//! 3. **Forgiving notifications**: Touch input double-fires. Throwing out a
//!    card twice, or throwing in an unknown card, is a no-op.
//!
//! ## Modules
//!
//! - `core`: Identity tokens, throw directions, configuration
//! - `events`: Card event kinds, event bus, default gesture payload
//! - `cards`: The card contract and a host-driven reference card
//! - `stack`: The registry itself
//! - `physics`: Shared spring engine
//! - `error`: Error types

pub mod cards;
pub mod core;
pub mod error;
pub mod events;
pub mod physics;
pub mod stack;

// Re-export commonly used types
pub use crate::core::{CardId, Direction, ElementId, StackConfig};

pub use crate::cards::{Card, CardContext, CardFactory, CardRef, SignalCard, SignalCardFactory};

pub use crate::events::{CardEventKind, EventBus, GestureEvent, Listener, ListenerId};

pub use crate::stack::{CardRecord, CardState, PayloadOf, Stack};

pub use crate::physics::{Spring, SpringConfig, SpringId, SpringListenerId, SpringSystem};

pub use crate::error::{ConfigError, PhysicsError, StackError};

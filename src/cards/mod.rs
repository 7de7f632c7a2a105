//! Cards: the contract a stack relies on, and a reference implementation.
//!
//! ## Key Types
//!
//! - `Card`: Event subscription and teardown contract every card fulfils
//! - `CardFactory`: How a stack builds the card for an element (closures work too)
//! - `CardContext`: The stack as seen by a card under construction
//! - `CardRef`: Identity-compared handle to a card owned by a stack
//! - `SignalCard`: Card whose events are emitted by the host

pub mod card;
pub mod signal;

pub use card::{Card, CardContext, CardFactory, CardRef};
pub use signal::{SignalCard, SignalCardFactory};

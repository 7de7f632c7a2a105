//! Core types: identity tokens, throw directions, configuration.

pub mod config;
pub mod direction;
pub mod element;

pub use config::StackConfig;
pub use direction::Direction;
pub use element::{CardId, ElementId};

//! The closed set of card events.
//!
//! Cards emit, and stacks republish, exactly these eleven events. Each has a
//! stable lowercase wire name (`throwout`, `dragmove`, ...), used for
//! parsing, display and serde.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// A card lifecycle or gesture event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardEventKind {
    /// The card was thrown out of the stack, in any direction.
    ThrowOut,
    /// The throw-out animation finished.
    ThrowOutEnd,
    ThrowOutLeft,
    ThrowOutRight,
    ThrowOutUp,
    ThrowOutDown,
    /// The card was thrown back into the stack.
    ThrowIn,
    /// The throw-in animation finished.
    ThrowInEnd,
    DragStart,
    DragMove,
    DragEnd,
}

impl CardEventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 11;

    /// Every event kind, in wire-name declaration order.
    pub const ALL: [CardEventKind; Self::COUNT] = [
        CardEventKind::ThrowOut,
        CardEventKind::ThrowOutEnd,
        CardEventKind::ThrowOutLeft,
        CardEventKind::ThrowOutRight,
        CardEventKind::ThrowOutUp,
        CardEventKind::ThrowOutDown,
        CardEventKind::ThrowIn,
        CardEventKind::ThrowInEnd,
        CardEventKind::DragStart,
        CardEventKind::DragMove,
        CardEventKind::DragEnd,
    ];

    /// The wire name of this event.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardEventKind::ThrowOut => "throwout",
            CardEventKind::ThrowOutEnd => "throwoutend",
            CardEventKind::ThrowOutLeft => "throwoutleft",
            CardEventKind::ThrowOutRight => "throwoutright",
            CardEventKind::ThrowOutUp => "throwoutup",
            CardEventKind::ThrowOutDown => "throwoutdown",
            CardEventKind::ThrowIn => "throwin",
            CardEventKind::ThrowInEnd => "throwinend",
            CardEventKind::DragStart => "dragstart",
            CardEventKind::DragMove => "dragmove",
            CardEventKind::DragEnd => "dragend",
        }
    }

    /// Look up an event by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The directional throw-out event for `direction`.
    #[must_use]
    pub const fn throw_out(direction: Direction) -> Self {
        match direction {
            Direction::Left => CardEventKind::ThrowOutLeft,
            Direction::Right => CardEventKind::ThrowOutRight,
            Direction::Up => CardEventKind::ThrowOutUp,
            Direction::Down => CardEventKind::ThrowOutDown,
        }
    }

    /// Direction of a directional throw-out event, `None` for the rest.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            CardEventKind::ThrowOutLeft => Some(Direction::Left),
            CardEventKind::ThrowOutRight => Some(Direction::Right),
            CardEventKind::ThrowOutUp => Some(Direction::Up),
            CardEventKind::ThrowOutDown => Some(Direction::Down),
            _ => None,
        }
    }

    /// Position in [`Self::ALL`]; [`EventBus`](super::EventBus) indexes its
    /// per-kind listener lists with it.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for CardEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown event name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown card event `{0}`")]
pub struct UnknownEvent(pub String);

impl FromStr for CardEventKind {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownEvent(s.to_owned()))
    }
}

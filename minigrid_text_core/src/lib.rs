use serde::{Deserialize, Serialize};

pub mod action;
pub mod describe;
pub mod direction;
pub mod encoding;
pub mod map;
pub mod summary;
pub mod world;

pub use action::{Action, ActionParseError, parse_action};
pub use describe::{
    DescribeConfig, DescribeError, DescribeMode, DoorReport, Observation, SceneContext,
    TextObservation, TraversalScope, annotate, describe,
};
pub use direction::{DirectionLabel, Orientation, resolve_direction};
pub use encoding::{Color, DecodeError, DecodedCell, DoorState, EncodedCell, ObjectKind, decode_cell};

/// Represents a 2D coordinate: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Returns the position one step along `(dx, dy)`, or `None` when it would
    /// leave the non-negative quadrant.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Position;

/// Where a target cell lies relative to a source cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionLabel {
    Here,
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl DirectionLabel {
    pub const ALL: [DirectionLabel; 9] = [
        DirectionLabel::Here,
        DirectionLabel::North,
        DirectionLabel::South,
        DirectionLabel::East,
        DirectionLabel::West,
        DirectionLabel::Northeast,
        DirectionLabel::Northwest,
        DirectionLabel::Southeast,
        DirectionLabel::Southwest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionLabel::Here => "here",
            DirectionLabel::North => "north",
            DirectionLabel::South => "south",
            DirectionLabel::East => "east",
            DirectionLabel::West => "west",
            DirectionLabel::Northeast => "northeast",
            DirectionLabel::Northwest => "northwest",
            DirectionLabel::Southeast => "southeast",
            DirectionLabel::Southwest => "southwest",
        }
    }

    /// The label seen from the other end. `Here` is its own opposite.
    pub fn opposite(&self) -> DirectionLabel {
        match self {
            DirectionLabel::Here => DirectionLabel::Here,
            DirectionLabel::North => DirectionLabel::South,
            DirectionLabel::South => DirectionLabel::North,
            DirectionLabel::East => DirectionLabel::West,
            DirectionLabel::West => DirectionLabel::East,
            DirectionLabel::Northeast => DirectionLabel::Southwest,
            DirectionLabel::Northwest => DirectionLabel::Southeast,
            DirectionLabel::Southeast => DirectionLabel::Northwest,
            DirectionLabel::Southwest => DirectionLabel::Northeast,
        }
    }
}

impl fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels the position of `target` as seen from `source`.
///
/// Rows grow southwards and columns grow eastwards. When both axes differ the
/// row word leads the compound label (`southeast`, `northwest`, ...).
pub fn resolve_direction(source: Position, target: Position) -> DirectionLabel {
    let vertical = target.y.cmp(&source.y);
    let horizontal = target.x.cmp(&source.x);

    match (vertical, horizontal) {
        (Ordering::Equal, Ordering::Equal) => DirectionLabel::Here,
        (Ordering::Greater, Ordering::Equal) => DirectionLabel::South,
        (Ordering::Less, Ordering::Equal) => DirectionLabel::North,
        (Ordering::Equal, Ordering::Greater) => DirectionLabel::East,
        (Ordering::Equal, Ordering::Less) => DirectionLabel::West,
        (Ordering::Greater, Ordering::Greater) => DirectionLabel::Southeast,
        (Ordering::Greater, Ordering::Less) => DirectionLabel::Southwest,
        (Ordering::Less, Ordering::Greater) => DirectionLabel::Northeast,
        (Ordering::Less, Ordering::Less) => DirectionLabel::Northwest,
    }
}

/// The direction an agent is facing, encoded 0..=3 as east, south, west, north.
///
/// Room door slots are indexed in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Orientation {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::East,
        Orientation::South,
        Orientation::West,
        Orientation::North,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::East => "east",
            Orientation::South => "south",
            Orientation::West => "west",
            Orientation::North => "north",
        }
    }

    /// Index of this orientation, also its door slot.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit step `(dx, dy)` in grid coordinates.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Orientation::East => (1, 0),
            Orientation::South => (0, 1),
            Orientation::West => (-1, 0),
            Orientation::North => (0, -1),
        }
    }

    /// Turns a quarter counter-clockwise.
    pub fn left(self) -> Orientation {
        Orientation::ALL[(self.index() + 3) % 4]
    }

    /// Turns a quarter clockwise.
    pub fn right(self) -> Orientation {
        Orientation::ALL[(self.index() + 1) % 4]
    }
}

impl TryFrom<u8> for Orientation {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Orientation::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

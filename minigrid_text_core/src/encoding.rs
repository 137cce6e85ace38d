//! Compact cell encoding shared with the simulation.
//!
//! Every grid tile is exchanged as three small integers: object kind, color
//! and state. The numbering below is fixed; an observation that carries an id
//! outside these tables was produced against a different table version and is
//! rejected rather than guessed at.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category of a grid object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ObjectKind {
    Unseen = 0,
    Empty = 1,
    Wall = 2,
    Floor = 3,
    Door = 4,
    Key = 5,
    Ball = 6,
    Box = 7,
    Goal = 8,
    Lava = 9,
    Agent = 10,
}

impl ObjectKind {
    /// All kinds, ordered by id.
    pub const ALL: [ObjectKind; 11] = [
        ObjectKind::Unseen,
        ObjectKind::Empty,
        ObjectKind::Wall,
        ObjectKind::Floor,
        ObjectKind::Door,
        ObjectKind::Key,
        ObjectKind::Ball,
        ObjectKind::Box,
        ObjectKind::Goal,
        ObjectKind::Lava,
        ObjectKind::Agent,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Unseen => "unseen",
            ObjectKind::Empty => "empty",
            ObjectKind::Wall => "wall",
            ObjectKind::Floor => "floor",
            ObjectKind::Door => "door",
            ObjectKind::Key => "key",
            ObjectKind::Ball => "ball",
            ObjectKind::Box => "box",
            ObjectKind::Goal => "goal",
            ObjectKind::Lava => "lava",
            ObjectKind::Agent => "agent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
    Purple = 3,
    Yellow = 4,
    Grey = 5,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Yellow,
        Color::Grey,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Yellow => "yellow",
            Color::Grey => "grey",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.as_str() == name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Door status. Only meaningful for doors; decoded for other kinds but unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DoorState {
    Open = 0,
    Closed = 1,
    Locked = 2,
}

impl DoorState {
    pub const ALL: [DoorState; 3] = [DoorState::Open, DoorState::Closed, DoorState::Locked];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Collapses the two door flags into one state. A locked door reports as
    /// locked even when its open flag is also set.
    pub fn from_flags(is_open: bool, is_locked: bool) -> Self {
        if is_locked {
            DoorState::Locked
        } else if is_open {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DoorState::Open => "open",
            DoorState::Closed => "closed",
            DoorState::Locked => "locked",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == name)
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One encoded grid tile: `(kind id, color id, state id)`.
///
/// Serializes as a three-element array so encoded images read like the
/// simulation's own `[w][h][3]` arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct EncodedCell {
    pub kind: u8,
    pub color: u8,
    pub state: u8,
}

impl EncodedCell {
    pub const fn new(kind: u8, color: u8, state: u8) -> Self {
        EncodedCell { kind, color, state }
    }

    /// The "not observed" sentinel.
    pub const UNSEEN: EncodedCell = EncodedCell::new(ObjectKind::Unseen as u8, 0, 0);

    /// An observed cell holding nothing.
    pub const EMPTY: EncodedCell = EncodedCell::new(ObjectKind::Empty as u8, 0, 0);

    /// A grey wall, used to pad crops that leave the grid.
    pub const WALL: EncodedCell =
        EncodedCell::new(ObjectKind::Wall as u8, Color::Grey as u8, 0);
}

impl Default for EncodedCell {
    fn default() -> Self {
        EncodedCell::UNSEEN
    }
}

impl From<[u8; 3]> for EncodedCell {
    fn from([kind, color, state]: [u8; 3]) -> Self {
        EncodedCell { kind, color, state }
    }
}

impl From<EncodedCell> for [u8; 3] {
    fn from(cell: EncodedCell) -> Self {
        [cell.kind, cell.color, cell.state]
    }
}

/// Names the lookup table a failed id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Kind,
    Color,
    State,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Kind => "object kind",
            Table::Color => "color",
            Table::State => "state",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Unknown {table} id {id} in encoded cell {cell:?}")]
    UnknownEncoding {
        table: Table,
        id: u8,
        cell: [u8; 3],
    },
}

/// A cell resolved to names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodedCell {
    pub kind: ObjectKind,
    pub color: Color,
    /// `None` for the agent, whose state slot carries its orientation.
    pub state: Option<DoorState>,
}

impl DecodedCell {
    /// Door state when this cell is a door.
    pub fn door_state(&self) -> Option<DoorState> {
        match self.kind {
            ObjectKind::Door => self.state,
            _ => None,
        }
    }

    /// `"<state> <color> <kind>"` for doors, `"<color> <kind>"` otherwise.
    pub fn phrase(&self) -> String {
        match self.door_state() {
            Some(state) => format!("{} {} {}", state, self.color, self.kind),
            None => format!("{} {}", self.color, self.kind),
        }
    }

    pub fn encode(&self) -> EncodedCell {
        EncodedCell {
            kind: self.kind.id(),
            color: self.color.id(),
            state: self.state.map_or(0, DoorState::id),
        }
    }
}

/// Resolves an encoded cell through the kind, color and state tables.
pub fn decode_cell(encoded: EncodedCell) -> Result<DecodedCell, DecodeError> {
    let unknown = |table, id| DecodeError::UnknownEncoding {
        table,
        id,
        cell: encoded.into(),
    };

    let kind = ObjectKind::from_id(encoded.kind).ok_or_else(|| unknown(Table::Kind, encoded.kind))?;
    let color = Color::from_id(encoded.color).ok_or_else(|| unknown(Table::Color, encoded.color))?;
    let state = match kind {
        ObjectKind::Agent => None,
        _ => Some(
            DoorState::from_id(encoded.state).ok_or_else(|| unknown(Table::State, encoded.state))?,
        ),
    };

    Ok(DecodedCell { kind, color, state })
}

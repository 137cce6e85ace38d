//! Read-only snapshot of a multi-room grid world.
//!
//! The simulation owns the real world state; this module only models what the
//! text layer reads from it: objects on the grid, room boundaries with their
//! door slots, the agent's pose and what it carries.

use serde::{Deserialize, Serialize};

use crate::{
    Position,
    describe::{self, DescribeConfig, DescribeError, Observation, SceneContext, TraversalScope},
    direction::Orientation,
    encoding::{Color, DecodedCell, DoorState, EncodedCell, ObjectKind},
    map::{Grid, GridError},
};

/// An object occupying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldObject {
    pub kind: ObjectKind,
    pub color: Color,
    /// Door flags; ignored for every other kind.
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub is_locked: bool,
}

impl WorldObject {
    pub fn new(kind: ObjectKind, color: Color) -> Self {
        WorldObject {
            kind,
            color,
            is_open: false,
            is_locked: false,
        }
    }

    pub fn wall() -> Self {
        WorldObject::new(ObjectKind::Wall, Color::Grey)
    }

    pub fn key(color: Color) -> Self {
        WorldObject::new(ObjectKind::Key, color)
    }

    pub fn ball(color: Color) -> Self {
        WorldObject::new(ObjectKind::Ball, color)
    }

    pub fn door(color: Color, is_open: bool, is_locked: bool) -> Self {
        WorldObject {
            kind: ObjectKind::Door,
            color,
            is_open,
            is_locked,
        }
    }

    pub fn door_state(&self) -> Option<DoorState> {
        match self.kind {
            ObjectKind::Door => Some(DoorState::from_flags(self.is_open, self.is_locked)),
            _ => None,
        }
    }

    /// The names this object decodes to, without a round trip through ids.
    pub fn decoded(&self) -> DecodedCell {
        let state = match self.kind {
            ObjectKind::Agent => None,
            ObjectKind::Door => self.door_state(),
            _ => Some(DoorState::Open),
        };
        DecodedCell {
            kind: self.kind,
            color: self.color,
            state,
        }
    }

    pub fn encode(&self) -> EncodedCell {
        self.decoded().encode()
    }
}

/// A rectangular room. The rectangle includes its surrounding walls, which
/// neighbouring rooms share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub top: Position,
    pub width: usize,
    pub height: usize,
    /// Door positions indexed by [`Orientation::index`].
    pub doors: [Option<Position>; 4],
    /// Positions of the objects inside the room, row-major.
    pub objects: Vec<Position>,
}

impl Room {
    pub fn new(top: Position, width: usize, height: usize) -> Self {
        Room {
            top,
            width,
            height,
            doors: [None; 4],
            objects: Vec::new(),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.top.x..self.top.x + self.width).contains(&pos.x)
            && (self.top.y..self.top.y + self.height).contains(&pos.y)
    }

    pub fn door(&self, side: Orientation) -> Option<Position> {
        self.doors[side.index()]
    }

    /// Converts a grid position into room-local coordinates.
    pub fn local(&self, pos: Position) -> Option<Position> {
        if self.contains(pos) {
            Some(Position::new(pos.x - self.top.x, pos.y - self.top.y))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Position {0} already contains an object")]
    Occupied(Position),
    #[error("Cannot place the agent inside a {kind} at {pos}")]
    Blocked { pos: Position, kind: ObjectKind },
    #[error("Room size {room_size} does not tile a {width}x{height} grid")]
    Untiled {
        room_size: usize,
        width: usize,
        height: usize,
    },
}

/// Snapshot of the world as the text layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridWorld {
    pub grid: Grid<Option<WorldObject>>,
    pub rooms: Vec<Room>,
    pub agent_pos: Position,
    pub agent_dir: Orientation,
    pub carrying: Option<WorldObject>,
    pub mission: String,
}

impl GridWorld {
    /// An empty world forming a single room, with the agent at the origin
    /// facing east.
    pub fn new(width: usize, height: usize) -> Self {
        GridWorld {
            grid: Grid::filled(width, height, None),
            rooms: vec![Room::new(Position::new(0, 0), width, height)],
            agent_pos: Position::new(0, 0),
            agent_dir: Orientation::East,
            carrying: None,
            mission: String::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn object_at(&self, pos: Position) -> Option<&WorldObject> {
        self.grid.get(pos.x, pos.y).and_then(Option::as_ref)
    }

    /// Puts an object on a free cell and rescans every room that holds it.
    pub fn place_object(&mut self, pos: Position, object: WorldObject) -> Result<(), WorldError> {
        if self.object_at(pos).is_some() {
            return Err(WorldError::Occupied(pos));
        }
        self.grid.set(pos.x, pos.y, Some(object))?;
        for index in 0..self.rooms.len() {
            let room = &self.rooms[index];
            if room.contains(pos) {
                let rescanned = self.scan_room(Room::new(room.top, room.width, room.height));
                self.rooms[index] = rescanned;
            }
        }
        Ok(())
    }

    /// Moves the agent. Only open doors and non-blocking objects may share its cell.
    pub fn place_agent(&mut self, pos: Position, facing: Orientation) -> Result<(), WorldError> {
        if !self.grid.contains(pos) {
            return Err(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width(),
                height: self.height(),
            }
            .into());
        }
        match self.object_at(pos) {
            Some(object) if object.kind == ObjectKind::Wall => {
                return Err(WorldError::Blocked {
                    pos,
                    kind: object.kind,
                });
            }
            Some(object) if object.kind == ObjectKind::Door && !object.is_open => {
                return Err(WorldError::Blocked {
                    pos,
                    kind: object.kind,
                });
            }
            _ => {}
        }
        self.agent_pos = pos;
        self.agent_dir = facing;
        Ok(())
    }

    /// Recomputes rooms from the grid.
    ///
    /// With `room_size` the grid is cut into square rooms of that side that
    /// share their walls, so a `cols x rows` layout needs a grid of
    /// `cols * (room_size - 1) + 1` cells per side. Without it the whole grid
    /// is one room. Door slots take the first door found on each wall; object
    /// lists hold every interior object other than walls and doors.
    pub fn partition_rooms(&mut self, room_size: Option<usize>) -> Result<(), WorldError> {
        let (width, height) = (self.width(), self.height());
        let layout = match room_size {
            None => vec![(Position::new(0, 0), width, height)],
            Some(size) => {
                let untiled = WorldError::Untiled {
                    room_size: size,
                    width,
                    height,
                };
                if size < 3 || width < size || height < size {
                    return Err(untiled);
                }
                let step = size - 1;
                if (width - 1) % step != 0 || (height - 1) % step != 0 {
                    return Err(untiled);
                }
                let (cols, rows) = ((width - 1) / step, (height - 1) / step);
                (0..rows)
                    .flat_map(|j| (0..cols).map(move |i| (Position::new(i * step, j * step), size, size)))
                    .collect()
            }
        };

        self.rooms = layout
            .into_iter()
            .map(|(top, w, h)| self.scan_room(Room::new(top, w, h)))
            .collect();
        tracing::debug!(rooms = self.rooms.len(), ?room_size, "partitioned grid into rooms");
        Ok(())
    }

    fn scan_room(&self, mut room: Room) -> Room {
        let (left, top) = (room.top.x, room.top.y);
        let (right, bottom) = (left + room.width - 1, top + room.height - 1);

        let is_door = |pos: Position| {
            self.object_at(pos)
                .is_some_and(|object| object.kind == ObjectKind::Door)
        };
        let walls: [Vec<Position>; 4] = [
            (top + 1..bottom).map(|y| Position::new(right, y)).collect(),
            (left + 1..right).map(|x| Position::new(x, bottom)).collect(),
            (top + 1..bottom).map(|y| Position::new(left, y)).collect(),
            (left + 1..right).map(|x| Position::new(x, top)).collect(),
        ];
        for side in Orientation::ALL {
            let mut doors = walls[side.index()].iter().copied().filter(|&pos| is_door(pos));
            room.doors[side.index()] = doors.next();
            if let Some(extra) = doors.next() {
                tracing::debug!(room = %room.top, %side, %extra, "ignoring extra door on wall");
            }
        }

        for y in top + 1..bottom {
            for x in left + 1..right {
                let pos = Position::new(x, y);
                if let Some(object) = self.object_at(pos) {
                    if !matches!(object.kind, ObjectKind::Wall | ObjectKind::Door) {
                        room.objects.push(pos);
                    }
                }
            }
        }
        room
    }

    /// The room holding `pos`. Cells on a shared wall belong to the room east
    /// or south of it.
    pub fn room_from_pos(&self, pos: Position) -> Option<&Room> {
        self.rooms.iter().rev().find(|room| room.contains(pos))
    }

    /// Encodes the whole grid. Empty cells encode as `empty`.
    pub fn encode(&self) -> Grid<EncodedCell> {
        self.grid
            .map(|cell| cell.as_ref().map_or(EncodedCell::EMPTY, WorldObject::encode))
    }

    fn agent_cell(&self) -> EncodedCell {
        EncodedCell::new(ObjectKind::Agent.id(), Color::Red.id(), self.agent_dir as u8)
    }

    /// The mission, if the world has one.
    fn mission_text(&self) -> Option<String> {
        (!self.mission.is_empty()).then(|| self.mission.clone())
    }

    /// Fully observed encoding with the agent drawn on its cell.
    pub fn observation(&self) -> Result<Observation, DescribeError> {
        let mut image = self.encode();
        let agent = image
            .get_mut(self.agent_pos.x, self.agent_pos.y)
            .ok_or_else(|| {
                DescribeError::MalformedObservation(format!(
                    "agent at {} lies outside the {}x{} grid",
                    self.agent_pos,
                    self.width(),
                    self.height()
                ))
            })?;
        *agent = self.agent_cell();
        Ok(Observation {
            image: Some(image),
            direction: self.agent_dir as u8,
            mission: self.mission_text(),
        })
    }

    /// Encoding of the agent's room only.
    ///
    /// The crop keeps the room's size; cells beyond the grid encode as walls.
    /// The agent's own cell is overwritten with the agent (red, state = its
    /// orientation), hiding whatever else was there such as an open door.
    pub fn room_observation(&self) -> Result<Observation, DescribeError> {
        let room = self.agent_room()?;
        let mut image = self.encode().slice(
            room.top.x,
            room.top.y,
            room.width,
            room.height,
            EncodedCell::WALL,
        );
        let local = room.local(self.agent_pos).ok_or_else(|| self.outside_rooms())?;
        image[local] = self.agent_cell();

        Ok(Observation {
            image: Some(image),
            direction: self.agent_dir as u8,
            mission: self.mission_text(),
        })
    }

    /// Context for describing [`GridWorld::observation`] or the room and
    /// full-grid scopes: the agent in grid coordinates.
    pub fn grid_context(&self) -> SceneContext<'_> {
        SceneContext {
            agent_pos: self.agent_pos,
            carrying: self.carrying.as_ref(),
            world: Some(self),
        }
    }

    /// Context for describing [`GridWorld::room_observation`]: the agent in
    /// room-local coordinates.
    pub fn room_context(&self) -> Result<SceneContext<'_>, DescribeError> {
        let room = self.agent_room()?;
        let local = room.local(self.agent_pos).ok_or_else(|| self.outside_rooms())?;
        Ok(SceneContext {
            agent_pos: local,
            carrying: self.carrying.as_ref(),
            world: Some(self),
        })
    }

    /// Describes the world from the agent's point of view. The window scope
    /// reads the room crop of [`GridWorld::room_observation`]; the other
    /// scopes read the grid directly. A world without a mission skips the
    /// mission block.
    pub fn describe(&self, config: &DescribeConfig) -> Result<String, DescribeError> {
        let config = DescribeConfig {
            include_mission: config.include_mission && !self.mission.is_empty(),
            ..*config
        };
        match config.scope {
            TraversalScope::Window => {
                let observation = self.room_observation()?;
                describe::describe(&observation, &self.room_context()?, &config)
            }
            TraversalScope::Room | TraversalScope::FullGrid => {
                describe::describe(&self.observation()?, &self.grid_context(), &config)
            }
        }
    }

    pub(crate) fn agent_room(&self) -> Result<&Room, DescribeError> {
        self.room_from_pos(self.agent_pos)
            .ok_or_else(|| self.outside_rooms())
    }

    fn outside_rooms(&self) -> DescribeError {
        DescribeError::MalformedObservation(format!(
            "agent at {} is not inside any room",
            self.agent_pos
        ))
    }
}

/// Errors raised while reading a text map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("Map string is empty")]
    Empty,
    #[error("Inconsistent width at row {row}: expected {expected}, found {found}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown map code '{code}' at position ({x}, {y})")]
    UnknownCode { code: String, x: usize, y: usize },
    #[error("Multiple start positions found")]
    MultipleStarts,
    #[error("No start position found in map")]
    MissingStart,
    #[error("Invalid directive '{0}'")]
    Directive(String),
    #[error(transparent)]
    World(#[from] WorldError),
}

enum MapToken {
    Blank,
    Object(WorldObject),
    Start(Orientation),
}

fn color_code(code: char) -> Option<Color> {
    match code {
        'R' => Some(Color::Red),
        'G' => Some(Color::Green),
        'B' => Some(Color::Blue),
        'P' => Some(Color::Purple),
        'Y' => Some(Color::Yellow),
        'E' => Some(Color::Grey),
        _ => None,
    }
}

fn parse_token(token: &str) -> Option<MapToken> {
    let fixed = match token {
        "BL" => Some(MapToken::Blank),
        "FL" => Some(MapToken::Object(WorldObject::new(ObjectKind::Floor, Color::Blue))),
        "WL" | "WA" => Some(MapToken::Object(WorldObject::wall())),
        "GL" => Some(MapToken::Object(WorldObject::new(ObjectKind::Goal, Color::Green))),
        "LV" => Some(MapToken::Object(WorldObject::new(ObjectKind::Lava, Color::Red))),
        "ST" | "S>" => Some(MapToken::Start(Orientation::East)),
        "Sv" => Some(MapToken::Start(Orientation::South)),
        "S<" => Some(MapToken::Start(Orientation::West)),
        "S^" => Some(MapToken::Start(Orientation::North)),
        _ => None,
    };
    if fixed.is_some() {
        return fixed;
    }

    let mut chars = token.chars();
    let (kind, color) = (chars.next()?, chars.next()?);
    if chars.next().is_some() {
        return None;
    }
    let color = color_code(color)?;
    let object = match kind {
        'K' => WorldObject::key(color),
        'A' => WorldObject::ball(color),
        'X' => WorldObject::new(ObjectKind::Box, color),
        'D' => WorldObject::door(color, false, false),
        'O' => WorldObject::door(color, true, false),
        'L' => WorldObject::door(color, false, true),
        _ => return None,
    };
    Some(MapToken::Object(object))
}

/// Loads a world from its text map.
///
/// The map is a block of whitespace-separated two-letter codes, one row per
/// line, optionally preceded by `@mission <text>` and `@room_size <n>` lines.
/// Fixed codes: `BL` empty, `FL` floor, `WL` wall, `GL` goal, `LV` lava and
/// `ST`/`S>`/`Sv`/`S<`/`S^` for the agent start. Colored codes pair a kind
/// letter (`K` key, `A` ball, `X` box, `D` closed door, `O` open door,
/// `L` locked door) with a color letter (`R G B P Y E`).
pub fn load_world_from_string(map_string: &str) -> Result<GridWorld, MapError> {
    let mut mission = String::new();
    let mut room_size = None;
    let mut rows: Vec<Vec<&str>> = Vec::new();

    for line in map_string.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(directive) = line.strip_prefix('@') {
            let (name, value) = directive.split_once(char::is_whitespace).unwrap_or((directive, ""));
            match name {
                "mission" => mission = value.trim().to_string(),
                "room_size" => {
                    let size = value
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| MapError::Directive(line.to_string()))?;
                    room_size = Some(size);
                }
                _ => return Err(MapError::Directive(line.to_string())),
            }
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let Some(first) = rows.first() {
            if tokens.len() != first.len() {
                return Err(MapError::InconsistentWidth {
                    row: rows.len(),
                    expected: first.len(),
                    found: tokens.len(),
                });
            }
        }
        rows.push(tokens);
    }

    let (width, height) = match rows.first() {
        Some(first) => (first.len(), rows.len()),
        None => return Err(MapError::Empty),
    };

    let mut world = GridWorld::new(width, height);
    world.mission = mission;
    let mut start = None;

    for (y, row) in rows.iter().enumerate() {
        for (x, code) in row.iter().enumerate() {
            let pos = Position::new(x, y);
            match parse_token(code) {
                Some(MapToken::Blank) => {}
                Some(MapToken::Object(object)) => world.place_object(pos, object)?,
                Some(MapToken::Start(facing)) => {
                    if start.replace((pos, facing)).is_some() {
                        return Err(MapError::MultipleStarts);
                    }
                }
                None => {
                    return Err(MapError::UnknownCode {
                        code: code.to_string(),
                        x,
                        y,
                    });
                }
            }
        }
    }

    let (start_pos, facing) = start.ok_or(MapError::MissingStart)?;
    world.place_agent(start_pos, facing)?;
    world.partition_rooms(room_size)?;
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = "
        @mission pick up the red key
        @room_size 5
        WL WL WL WL WL WL WL WL WL
        WL BL BL BL WL BL AB BL WL
        WL ST KR BL LY BL BL BL WL
        WL BL BL BL WL BL BL BL WL
        WL WL WL WL WL WL WL WL WL
    ";

    #[test]
    fn loads_two_rooms() {
        let world = load_world_from_string(TWO_ROOMS).unwrap();
        assert_eq!(world.width(), 9);
        assert_eq!(world.height(), 5);
        assert_eq!(world.mission, "pick up the red key");
        assert_eq!(world.agent_pos, Position::new(1, 2));
        assert_eq!(world.agent_dir, Orientation::East);
        assert_eq!(world.rooms.len(), 2);

        let west = &world.rooms[0];
        assert_eq!(west.top, Position::new(0, 0));
        assert_eq!(west.door(Orientation::East), Some(Position::new(4, 2)));
        assert_eq!(west.door(Orientation::West), None);
        assert_eq!(west.objects, vec![Position::new(2, 2)]);

        let east = &world.rooms[1];
        assert_eq!(east.top, Position::new(4, 0));
        assert_eq!(east.door(Orientation::West), Some(Position::new(4, 2)));
        assert_eq!(east.objects, vec![Position::new(6, 1)]);
    }

    #[test]
    fn shared_wall_belongs_to_the_later_room() {
        let world = load_world_from_string(TWO_ROOMS).unwrap();
        assert_eq!(world.room_from_pos(Position::new(4, 2)).unwrap().top, Position::new(4, 0));
        assert_eq!(world.room_from_pos(Position::new(3, 2)).unwrap().top, Position::new(0, 0));
        assert!(world.room_from_pos(Position::new(9, 0)).is_none());
    }

    #[test]
    fn room_observation_overlays_agent() {
        let mut world = load_world_from_string(TWO_ROOMS).unwrap();
        world.agent_dir = Orientation::North;
        let observation = world.room_observation().unwrap();
        let image = observation.image.unwrap();
        assert_eq!((image.width(), image.height()), (5, 5));
        assert_eq!(image[(1, 2)], EncodedCell::new(10, 0, 3));
        assert_eq!(image[(2, 2)], EncodedCell::new(5, 0, 0));
        assert_eq!(image[(4, 2)], EncodedCell::new(4, 4, 2));
        assert_eq!(image[(1, 1)], EncodedCell::EMPTY);
        assert_eq!(observation.direction, 3);
        assert_eq!(world.room_context().unwrap().agent_pos, Position::new(1, 2));
    }

    #[test]
    fn describe_picks_the_observation_for_the_scope() {
        let world = load_world_from_string(TWO_ROOMS).unwrap();
        let plain = world.describe(&DescribeConfig::plain()).unwrap();
        assert!(plain.contains("There is a locked yellow door to your east."));
        let room = world.describe(&DescribeConfig::room()).unwrap();
        assert!(room.starts_with("Mission: pick up the red key\n"));
        assert!(room.contains("There is a locked yellow door leading east."));
        let full = world.describe(&DescribeConfig::full_grid()).unwrap();
        assert!(full.contains("You see a blue ball to your northeast."));
    }

    #[test]
    fn agent_off_the_grid_is_malformed() {
        let mut world = load_world_from_string(TWO_ROOMS).unwrap();
        world.agent_pos = Position::new(20, 20);
        assert!(matches!(
            world.observation(),
            Err(DescribeError::MalformedObservation(_))
        ));
        for config in [DescribeConfig::plain(), DescribeConfig::room(), DescribeConfig::full_grid()] {
            assert!(matches!(
                world.describe(&config),
                Err(DescribeError::MalformedObservation(_))
            ));
        }
    }

    #[test]
    fn world_without_mission_skips_the_mission_block() {
        let world = load_world_from_string("WL WL WL WL\nWL ST KR WL\nWL WL WL WL").unwrap();
        assert_eq!(world.observation().unwrap().mission, None);
        assert_eq!(world.room_observation().unwrap().mission, None);
        for config in [DescribeConfig::room(), DescribeConfig::full_grid()] {
            let text = world.describe(&config).unwrap();
            assert!(text.starts_with("You are facing east.\n"), "{text}");
            assert!(!text.contains("Mission"));
        }
    }

    #[test]
    fn placing_an_object_rescans_its_room() {
        let mut world = load_world_from_string(TWO_ROOMS).unwrap();
        world.place_object(Position::new(2, 1), WorldObject::ball(Color::Purple)).unwrap();
        assert_eq!(world.rooms[0].objects, vec![Position::new(2, 1), Position::new(2, 2)]);
        assert_eq!(world.rooms[1].objects, vec![Position::new(6, 1)]);

        world.place_object(Position::new(2, 4), WorldObject::door(Color::Red, false, false)).unwrap();
        assert_eq!(world.rooms[0].door(Orientation::South), Some(Position::new(2, 4)));

        let text = world.describe(&DescribeConfig::room()).unwrap();
        assert!(text.contains("You see a purple ball to your northeast."));
        assert!(text.contains("There is a closed red door leading south."));
    }

    #[test]
    fn single_room_without_room_size() {
        let world = load_world_from_string("WL WL WL\nWL ST WL\nWL WL WL").unwrap();
        assert_eq!(world.rooms.len(), 1);
        assert_eq!(world.rooms[0].width, 3);
        assert!(world.mission.is_empty());
    }

    #[test]
    fn map_errors() {
        assert_eq!(load_world_from_string("  \n "), Err(MapError::Empty));
        assert_eq!(
            load_world_from_string("ST BL\nBL"),
            Err(MapError::InconsistentWidth {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            load_world_from_string("ST QQ"),
            Err(MapError::UnknownCode {
                code: "QQ".to_string(),
                x: 1,
                y: 0
            })
        );
        assert_eq!(load_world_from_string("ST ST"), Err(MapError::MultipleStarts));
        assert_eq!(load_world_from_string("BL BL"), Err(MapError::MissingStart));
        assert_eq!(
            load_world_from_string("@colour red\nST"),
            Err(MapError::Directive("@colour red".to_string()))
        );
        assert!(matches!(
            load_world_from_string("@room_size 4\nST BL BL"),
            Err(MapError::World(WorldError::Untiled { room_size: 4, .. }))
        ));
    }

    #[test]
    fn agent_cannot_start_in_a_closed_door() {
        let mut world = GridWorld::new(3, 1);
        world
            .place_object(Position::new(1, 0), WorldObject::door(Color::Red, false, false))
            .unwrap();
        assert_eq!(
            world.place_agent(Position::new(1, 0), Orientation::East),
            Err(WorldError::Blocked {
                pos: Position::new(1, 0),
                kind: ObjectKind::Door
            })
        );
        assert!(world.place_agent(Position::new(2, 0), Orientation::East).is_ok());
    }

    #[test]
    fn door_object_reports_locked_first() {
        let door = WorldObject::door(Color::Yellow, true, true);
        assert_eq!(door.door_state(), Some(DoorState::Locked));
        assert_eq!(door.encode(), EncodedCell::new(4, 4, 2));
        assert_eq!(WorldObject::key(Color::Red).door_state(), None);
    }
}

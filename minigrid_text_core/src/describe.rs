//! Natural-language scene descriptions.
//!
//! One describer serves every observation mode. A [`DescribeConfig`] picks the
//! blocks to emit and the cells to walk; the blocks always come out in the
//! same order:
//!
//! 1. mission
//! 2. orientation
//! 3. doors
//! 4. objects immediately next to the agent
//! 5. every other object in scope
//! 6. inventory
//!
//! Output depends only on the inputs, so describing the same snapshot twice
//! yields identical text.

use serde::{Deserialize, Serialize};

use crate::{
    Position,
    direction::{DirectionLabel, Orientation, resolve_direction},
    encoding::{DecodeError, DecodedCell, EncodedCell, ObjectKind, decode_cell},
    map::{Grid, GridError},
    world::{GridWorld, Room, WorldObject},
};

/// Which cells the object block walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalScope {
    /// The observation image, row-major. The agent position is in image
    /// coordinates.
    #[default]
    Window,
    /// The door slots, then the object list, of the room containing the agent.
    Room,
    /// The whole world grid, row-major.
    FullGrid,
}

/// How doors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorReport {
    Omit,
    /// The four door slots of the agent's room, by the side they lead out of.
    Slots,
    /// Every door cell in scope, by its direction from the agent.
    #[default]
    Cells,
}

/// Selects the description blocks and the traversal scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    pub include_mission: bool,
    pub include_orientation: bool,
    pub doors: DoorReport,
    pub include_adjacency: bool,
    pub scope: TraversalScope,
    pub include_inventory: bool,
}

impl DescribeConfig {
    /// Describes an image window: facing, doors and objects seen, inventory.
    pub const fn plain() -> Self {
        DescribeConfig {
            include_mission: false,
            include_orientation: true,
            doors: DoorReport::Cells,
            include_adjacency: false,
            scope: TraversalScope::Window,
            include_inventory: true,
        }
    }

    /// Describes the agent's room with its door slots and immediate surroundings.
    pub const fn room() -> Self {
        DescribeConfig {
            include_mission: true,
            include_orientation: true,
            doors: DoorReport::Slots,
            include_adjacency: true,
            scope: TraversalScope::Room,
            include_inventory: true,
        }
    }

    /// Describes every room of the grid at once.
    pub const fn full_grid() -> Self {
        DescribeConfig {
            include_mission: true,
            include_orientation: true,
            doors: DoorReport::Cells,
            include_adjacency: true,
            scope: TraversalScope::FullGrid,
            include_inventory: true,
        }
    }
}

impl Default for DescribeConfig {
    fn default() -> Self {
        DescribeConfig::plain()
    }
}

/// Named presets of [`DescribeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescribeMode {
    Plain,
    Room,
    FullGrid,
}

impl DescribeMode {
    pub const ALL: [DescribeMode; 3] = [DescribeMode::Plain, DescribeMode::Room, DescribeMode::FullGrid];

    pub fn config(self) -> DescribeConfig {
        match self {
            DescribeMode::Plain => DescribeConfig::plain(),
            DescribeMode::Room => DescribeConfig::room(),
            DescribeMode::FullGrid => DescribeConfig::full_grid(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DescribeMode::Plain => "plain",
            DescribeMode::Room => "room",
            DescribeMode::FullGrid => "full-grid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescribeError {
    #[error(transparent)]
    UnknownEncoding(#[from] DecodeError),
    #[error("Malformed observation: {0}")]
    MalformedObservation(String),
}

impl From<GridError> for DescribeError {
    fn from(err: GridError) -> Self {
        DescribeError::MalformedObservation(err.to_string())
    }
}

fn malformed(message: impl Into<String>) -> DescribeError {
    DescribeError::MalformedObservation(message.into())
}

/// What the simulation hands over each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Encoded cells; required by the window scope.
    #[serde(default)]
    pub image: Option<Grid<EncodedCell>>,
    /// Agent orientation, 0..=3.
    pub direction: u8,
    #[serde(default)]
    pub mission: Option<String>,
}

impl Observation {
    /// Builds an observation from image rows (outer index is the row).
    pub fn from_rows(
        rows: Vec<Vec<[u8; 3]>>,
        direction: u8,
        mission: Option<String>,
    ) -> Result<Self, DescribeError> {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(EncodedCell::from).collect())
            .collect();
        Ok(Observation {
            image: Some(Grid::try_from_rows(rows)?),
            direction,
            mission,
        })
    }
}

/// An observation together with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub text: String,
}

/// Agent-side facts the observation does not carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneContext<'a> {
    /// Agent position in the coordinates of the traversal scope: image
    /// coordinates for [`TraversalScope::Window`], grid coordinates otherwise.
    pub agent_pos: Position,
    pub carrying: Option<&'a WorldObject>,
    /// Needed by the room and full-grid scopes and by door slots.
    pub world: Option<&'a GridWorld>,
}

impl<'a> SceneContext<'a> {
    pub fn at(agent_pos: Position) -> Self {
        SceneContext {
            agent_pos,
            carrying: None,
            world: None,
        }
    }

    pub fn carrying(mut self, object: &'a WorldObject) -> Self {
        self.carrying = Some(object);
        self
    }

    pub fn with_world(mut self, world: &'a GridWorld) -> Self {
        self.world = Some(world);
        self
    }
}

/// Cells the describer reads from, resolved from the configured scope.
enum ScopeView<'a> {
    Window(&'a Grid<EncodedCell>),
    Room { world: &'a GridWorld, room: &'a Room },
    FullGrid(&'a GridWorld),
}

impl<'a> ScopeView<'a> {
    fn resolve(
        scope: TraversalScope,
        observation: &'a Observation,
        context: &SceneContext<'a>,
    ) -> Result<Self, DescribeError> {
        let world = || {
            context
                .world
                .ok_or_else(|| malformed(format!("{scope:?} scope needs a grid world")))
        };
        let view = match scope {
            TraversalScope::Window => ScopeView::Window(
                observation
                    .image
                    .as_ref()
                    .ok_or_else(|| malformed("observation has no image"))?,
            ),
            TraversalScope::Room => {
                let world = world()?;
                let room = world.room_from_pos(context.agent_pos).ok_or_else(|| {
                    malformed(format!("agent at {} is not inside any room", context.agent_pos))
                })?;
                ScopeView::Room { world, room }
            }
            TraversalScope::FullGrid => ScopeView::FullGrid(world()?),
        };

        if !view.contains(context.agent_pos) {
            return Err(malformed(format!(
                "agent at {} lies outside the {scope:?} scope",
                context.agent_pos
            )));
        }
        Ok(view)
    }

    fn contains(&self, pos: Position) -> bool {
        match self {
            ScopeView::Window(image) => image.contains(pos),
            ScopeView::Room { room, .. } => room.contains(pos),
            ScopeView::FullGrid(world) => world.grid.contains(pos),
        }
    }

    /// The decoded cell at `pos`; `None` for empty world cells.
    fn cell_at(&self, pos: Position) -> Result<Option<DecodedCell>, DecodeError> {
        match self {
            ScopeView::Window(image) => image.get(pos.x, pos.y).copied().map(decode_cell).transpose(),
            ScopeView::Room { world, .. } | ScopeView::FullGrid(world) => {
                Ok(world.object_at(pos).map(WorldObject::decoded))
            }
        }
    }

    /// Occupied cells in traversal order. Every image cell is decoded, so an
    /// unknown id anywhere in the window fails the whole description.
    fn traverse(&self) -> Result<Vec<(Position, DecodedCell)>, DecodeError> {
        match self {
            ScopeView::Window(image) => image
                .enumerate()
                .map(|(pos, cell)| decode_cell(*cell).map(|decoded| (pos, decoded)))
                .collect(),
            ScopeView::Room { world, room } => Ok(room
                .doors
                .iter()
                .flatten()
                .chain(&room.objects)
                .filter_map(|&pos| world.object_at(pos).map(|object| (pos, object.decoded())))
                .collect()),
            ScopeView::FullGrid(world) => Ok(world
                .grid
                .enumerate()
                .filter_map(|(pos, cell)| cell.as_ref().map(|object| (pos, object.decoded())))
                .collect()),
        }
    }
}

/// Prefixes a noun phrase with "a" or "an".
fn with_article(phrase: &str) -> String {
    let article = match phrase.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {phrase}")
}

fn relative(label: DirectionLabel) -> String {
    match label {
        DirectionLabel::Here => "at your position".to_string(),
        _ => format!("to your {label}"),
    }
}

/// Kinds never mentioned by the object block.
fn is_background(kind: ObjectKind) -> bool {
    matches!(
        kind,
        ObjectKind::Unseen | ObjectKind::Empty | ObjectKind::Wall | ObjectKind::Agent | ObjectKind::Door
    )
}

fn door_slot_lines(context: &SceneContext<'_>) -> Result<Vec<String>, DescribeError> {
    let world = context
        .world
        .ok_or_else(|| malformed("door slots need a grid world"))?;
    let room = world.agent_room()?;

    let mut lines = Vec::new();
    for side in Orientation::ALL {
        let Some(pos) = room.door(side) else {
            continue;
        };
        let door = world
            .object_at(pos)
            .filter(|object| object.kind == ObjectKind::Door)
            .ok_or_else(|| {
                malformed(format!(
                    "{side} door slot of the room at {} points at {pos}, which holds no door",
                    room.top
                ))
            })?;
        lines.push(format!(
            "There is {} leading {side}.",
            with_article(&door.decoded().phrase())
        ));
    }
    Ok(lines)
}

fn adjacency_lines(view: &ScopeView<'_>, agent: Position) -> Result<Vec<String>, DecodeError> {
    let mut lines = Vec::new();
    for side in Orientation::ALL {
        let (dx, dy) = side.delta();
        let Some(pos) = agent.offset(dx, dy).filter(|&pos| view.contains(pos)) else {
            continue;
        };
        match view.cell_at(pos)? {
            Some(cell) if !matches!(cell.kind, ObjectKind::Unseen | ObjectKind::Empty) => {
                lines.push(format!(
                    "There is {} immediately {side} of you.",
                    with_article(&cell.phrase())
                ));
            }
            _ => {}
        }
    }
    Ok(lines)
}

/// Describes the scene as newline-separated sentences.
///
/// Fails without producing text when a required input is missing or an image
/// cell does not decode.
pub fn describe(
    observation: &Observation,
    context: &SceneContext<'_>,
    config: &DescribeConfig,
) -> Result<String, DescribeError> {
    let orientation = Orientation::try_from(observation.direction).map_err(|direction| {
        malformed(format!("agent direction {direction} is outside 0..=3"))
    })?;
    let view = ScopeView::resolve(config.scope, observation, context)?;
    let cells = view.traverse()?;
    let agent = context.agent_pos;

    let mut lines = Vec::new();

    if config.include_mission {
        let mission = observation
            .mission
            .as_deref()
            .ok_or_else(|| malformed("observation has no mission"))?;
        lines.push(format!("Mission: {mission}"));
    }

    if config.include_orientation {
        lines.push(format!("You are facing {orientation}."));
    }

    match config.doors {
        DoorReport::Omit => {}
        DoorReport::Slots => lines.extend(door_slot_lines(context)?),
        DoorReport::Cells => lines.extend(
            cells
                .iter()
                .filter(|(_, cell)| cell.kind == ObjectKind::Door)
                .map(|(pos, cell)| {
                    format!(
                        "There is {} {}.",
                        with_article(&cell.phrase()),
                        relative(resolve_direction(agent, *pos))
                    )
                }),
        ),
    }

    if config.include_adjacency {
        lines.extend(adjacency_lines(&view, agent)?);
    }

    for (pos, cell) in &cells {
        if is_background(cell.kind) {
            tracing::trace!(%pos, kind = %cell.kind, "skipping background cell");
            continue;
        }
        lines.push(format!(
            "You see {} {}.",
            with_article(&cell.phrase()),
            relative(resolve_direction(agent, *pos))
        ));
    }

    if config.include_inventory {
        if let Some(carried) = context.carrying {
            lines.push(format!(
                "You are carrying {}.",
                with_article(&carried.decoded().phrase())
            ));
        }
    }

    tracing::debug!(scope = ?config.scope, sentences = lines.len(), "described scene");
    Ok(lines.join("\n"))
}

/// Describes `observation` and returns it with the text attached.
pub fn annotate(
    observation: Observation,
    context: &SceneContext<'_>,
    config: &DescribeConfig,
) -> Result<TextObservation, DescribeError> {
    let text = describe(&observation, context, config)?;
    Ok(TextObservation { observation, text })
}

//! Object queries and flat listings over a [`GridWorld`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    Position,
    direction::Orientation,
    encoding::{Color, DecodedCell, ObjectKind},
    world::{GridWorld, WorldObject},
};

/// Wildcard accepted for either half of an [`ObjectDescription`].
pub const ANY: &str = "any";

/// A `(color, kind)` pattern; `None` on either side matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub kind: Option<ObjectKind>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptionParseError {
    #[error("Expected '<color> <kind>', got '{0}'")]
    Template(String),
    #[error("Unknown color '{0}'")]
    Color(String),
    #[error("Unknown object kind '{0}'")]
    Kind(String),
}

impl ObjectDescription {
    pub fn new(kind: ObjectKind, color: Color) -> Self {
        ObjectDescription {
            kind: Some(kind),
            color: Some(color),
        }
    }

    pub fn matches(&self, cell: &DecodedCell) -> bool {
        self.kind.is_none_or(|kind| kind == cell.kind)
            && self.color.is_none_or(|color| color == cell.color)
    }

    pub fn matches_object(&self, object: &WorldObject) -> bool {
        self.matches(&object.decoded())
    }
}

impl fmt::Display for ObjectDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = self.color.as_ref().map_or(ANY, Color::as_str);
        let kind = self.kind.as_ref().map_or(ANY, ObjectKind::as_str);
        write!(f, "{color} {kind}")
    }
}

impl FromStr for ObjectDescription {
    type Err = DescriptionParseError;

    /// Parses `"<color> <kind>"`, either word possibly `any`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();
        let [color, kind] = words.as_slice() else {
            return Err(DescriptionParseError::Template(s.to_string()));
        };

        let color = match *color {
            ANY => None,
            name => Some(
                Color::from_name(name).ok_or_else(|| DescriptionParseError::Color(name.to_string()))?,
            ),
        };
        let kind = match *kind {
            ANY => None,
            name => Some(
                ObjectKind::from_name(name)
                    .ok_or_else(|| DescriptionParseError::Kind(name.to_string()))?,
            ),
        };
        Ok(ObjectDescription { kind, color })
    }
}

/// The first object matching `description`, scanning rows top to bottom.
pub fn find_object(world: &GridWorld, description: &ObjectDescription) -> Option<Position> {
    world
        .grid
        .enumerate()
        .find_map(|(pos, cell)| match cell {
            Some(object) if description.matches_object(object) => Some(pos),
            _ => None,
        })
}

/// One line per occupied cell: `"<state >?<color> <kind> at (x, y)"`.
pub fn grid_listing(world: &GridWorld) -> String {
    world
        .grid
        .enumerate()
        .filter_map(|(pos, cell)| cell.as_ref().map(|object| format!("{} at {pos}\n", object.decoded().phrase())))
        .collect()
}

fn facing_word(facing: Orientation) -> &'static str {
    match facing {
        Orientation::East => "right",
        Orientation::South => "down",
        Orientation::West => "left",
        Orientation::North => "up",
    }
}

/// Grid listing followed by the mission and the agent's pose.
pub fn world_summary(world: &GridWorld) -> String {
    let mut summary = String::from("The environment consists of:\n");
    for line in grid_listing(world).lines() {
        summary.push_str("--");
        summary.push_str(line);
        summary.push('\n');
    }
    summary.push_str(&format!("The overall mission is: {}\n", world.mission));
    summary.push_str(&format!("The agent is at: {}\n", world.agent_pos));
    summary.push_str(&format!("The agent is facing: {}", facing_word(world.agent_dir)));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::load_world_from_string;

    const MAP: &str = "
        @mission open the door
        WL WL WL WL WL
        WL S^ KB AR WL
        WL KR BL OG WL
        WL WL WL WL WL
    ";

    #[test]
    fn description_text_round_trip() {
        let description: ObjectDescription = "Red Key".parse().unwrap();
        assert_eq!(description, ObjectDescription::new(ObjectKind::Key, Color::Red));
        assert_eq!(description.to_string(), "red key");

        let wildcard: ObjectDescription = "any ball".parse().unwrap();
        assert_eq!(wildcard.color, None);
        assert_eq!(wildcard.to_string(), "any ball");
    }

    #[test]
    fn description_parse_errors() {
        assert_eq!(
            "red".parse::<ObjectDescription>(),
            Err(DescriptionParseError::Template("red".to_string()))
        );
        assert_eq!(
            "pink key".parse::<ObjectDescription>(),
            Err(DescriptionParseError::Color("pink".to_string()))
        );
        assert_eq!(
            "red hat".parse::<ObjectDescription>(),
            Err(DescriptionParseError::Kind("hat".to_string()))
        );
    }

    #[test]
    fn wildcards_match() {
        let red_key = WorldObject::key(Color::Red);
        assert!(ObjectDescription::default().matches_object(&red_key));
        assert!("any key".parse::<ObjectDescription>().unwrap().matches_object(&red_key));
        assert!("red any".parse::<ObjectDescription>().unwrap().matches_object(&red_key));
        assert!(!"blue key".parse::<ObjectDescription>().unwrap().matches_object(&red_key));
        assert!(!"red ball".parse::<ObjectDescription>().unwrap().matches_object(&red_key));
    }

    #[test]
    fn finds_first_match_in_row_major_order() {
        let world = load_world_from_string(MAP).unwrap();
        let any_key = "any key".parse().unwrap();
        assert_eq!(find_object(&world, &any_key), Some(Position::new(2, 1)));
        let red_key = "red key".parse().unwrap();
        assert_eq!(find_object(&world, &red_key), Some(Position::new(1, 2)));
        let goal = "any goal".parse().unwrap();
        assert_eq!(find_object(&world, &goal), None);
    }

    #[test]
    fn summary_lists_objects_and_pose() {
        let world = load_world_from_string(MAP).unwrap();
        let listing = grid_listing(&world);
        assert!(listing.contains("blue key at (2, 1)\n"));
        assert!(listing.contains("open green door at (3, 2)\n"));
        assert!(listing.starts_with("grey wall at (0, 0)\n"));

        let summary = world_summary(&world);
        assert!(summary.starts_with("The environment consists of:\n--grey wall at (0, 0)\n"));
        assert!(summary.contains("--red ball at (3, 1)\n"));
        assert!(summary.contains("The overall mission is: open the door\n"));
        assert!(summary.contains("The agent is at: (1, 1)\n"));
        assert!(summary.ends_with("The agent is facing: up"));
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The discrete actions the simulation accepts, numbered 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Action {
    Left = 0,
    Right = 1,
    Forward = 2,
    Pickup = 3,
    Drop = 4,
    Toggle = 5,
    Done = 6,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    /// Holds the command after trimming and lower-casing.
    #[error("Unrecognized action: {0}")]
    Unrecognized(String),
    #[error("Action id {0} is out of range")]
    InvalidId(u8),
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Left,
        Action::Right,
        Action::Forward,
        Action::Pickup,
        Action::Drop,
        Action::Toggle,
        Action::Done,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// The command keyword for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Forward => "forward",
            Action::Pickup => "pickup",
            Action::Drop => "drop",
            Action::Toggle => "toggle",
            Action::Done => "done",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Action {
    type Error = ActionParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Action::ALL
            .get(value as usize)
            .copied()
            .ok_or(ActionParseError::InvalidId(value))
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(s)
    }
}

/// Maps a text command onto an [`Action`].
///
/// Surrounding whitespace and letter case are ignored; anything else must
/// match one of the seven keywords exactly.
pub fn parse_action(text: &str) -> Result<Action, ActionParseError> {
    let normalized = text.trim().to_lowercase();
    match Action::ALL.into_iter().find(|action| action.as_str() == normalized) {
        Some(action) => {
            tracing::trace!(%action, "parsed action");
            Ok(action)
        }
        None => {
            tracing::warn!(command = %normalized, "rejected action command");
            Err(ActionParseError::Unrecognized(normalized))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_keyword() {
        for (id, action) in Action::ALL.into_iter().enumerate() {
            assert_eq!(parse_action(action.as_str()), Ok(action));
            assert_eq!(action.id() as usize, id);
        }
    }

    #[test]
    fn ignores_case_and_whitespace() {
        assert_eq!(parse_action(" Forward \n"), parse_action("forward"));
        assert_eq!(parse_action("\tPICKUP"), Ok(Action::Pickup));
        assert_eq!("Toggle".parse::<Action>(), Ok(Action::Toggle));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!(
            parse_action("jump"),
            Err(ActionParseError::Unrecognized("jump".to_string()))
        );
        assert_eq!(
            parse_action("  Go Forward "),
            Err(ActionParseError::Unrecognized("go forward".to_string()))
        );
        assert!(parse_action("forw").is_err());
        assert!(parse_action("").is_err());
    }

    #[test]
    fn error_names_the_command() {
        let err = parse_action("Jump").unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized action: jump");
    }

    #[test]
    fn action_ids_round_trip() {
        assert_eq!(Action::try_from(2u8), Ok(Action::Forward));
        assert_eq!(Action::try_from(7u8), Err(ActionParseError::InvalidId(7)));
    }
}

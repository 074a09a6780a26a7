use crate::error::LrudError;
use crate::node::Orientation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Abstract directional input token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The container orientation this direction moves along
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Vertical,
            Direction::Left | Direction::Right => Orientation::Horizontal,
        }
    }

    /// Whether this direction walks siblings backwards (towards the first child)
    pub fn is_backward(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LrudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(LrudError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = LrudError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// True when a container with `orientation` can act on `direction`
pub fn is_direction_and_orientation_matching(orientation: Orientation, direction: Direction) -> bool {
    direction.axis() == orientation
}

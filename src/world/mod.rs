mod grid;
mod mapgen;
mod seed;

pub use grid::{Grid, Tile};
pub use seed::{Adversary, Collapse, Occupation, WorldSeed};

use serde::{Deserialize, Serialize};

use crate::action::Direction;

/// A grid coordinate; signed so pointer input can land off the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position in a direction (may be off the map)
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

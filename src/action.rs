use serde::{Deserialize, Serialize};

use crate::dilemma::Choice;
use crate::structures::BuildingKind;
use crate::world::Position;

/// Commands the engine accepts. Input devices and timers all feed this one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    // Seed screen
    /// Replace the pending world seed with a fresh one
    RerollSeed,
    /// Begin the run with the pending seed
    StartRun,

    // Movement
    Move(Direction),

    // Build mode
    ToggleBuildMode,
    ExitBuildMode,
    SelectBuilding(BuildingKind),
    Deselect,
    /// Pointer moved over a cell
    Hover(Position),
    Rotate,
    PlaceAtCursor,
    DismantleAtCursor,
    Place(Position),
    Dismantle(Position),

    // Dilemmas
    TriggerDilemma,
    ResolveDilemma(Choice),

    // Timers
    DayTick,
    DilemmaTick,

    /// Abandon the run and return to the seed screen with a fresh seed
    NewRun,
}

impl Command {
    /// Commands produced by the wall-clock scheduler rather than the player
    pub fn is_tick(&self) -> bool {
        matches!(self, Command::DayTick | Command::DilemmaTick)
    }
}

/// Movement directions (4-directional)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Get the delta for this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Get direction name for display
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// WASD bindings
    pub fn from_wasd(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }
}

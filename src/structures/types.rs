//! Building kinds and placed building instances.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::world::Position;

/// Types of buildings the survivor can put up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    /// Cheap barrier
    Wall,
    /// Grows food each day
    Farm,
    /// Collects water each day
    Raincatcher,
    /// Base defense
    Turret,
}

impl BuildingKind {
    /// Display name for the building
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingKind::Wall => "Wall",
            BuildingKind::Farm => "Farm",
            BuildingKind::Raincatcher => "Raincatcher",
            BuildingKind::Turret => "Turret",
        }
    }

    /// All building kinds, in catalog order
    pub fn all() -> &'static [BuildingKind] {
        &[
            BuildingKind::Wall,
            BuildingKind::Farm,
            BuildingKind::Raincatcher,
            BuildingKind::Turret,
        ]
    }

    /// Map glyph for text rendering
    pub fn glyph(&self) -> char {
        match self {
            BuildingKind::Wall => 'W',
            BuildingKind::Farm => 'F',
            BuildingKind::Raincatcher => 'R',
            BuildingKind::Turret => 'X',
        }
    }
}

/// Facing of a placed building. Display only: no rule reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    /// Next quarter turn, wrapping R3 back to R0
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }

    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}

/// A building standing on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBuilding {
    pub id: Uuid,
    pub kind: BuildingKind,
    pub position: Position,
    pub rotation: Rotation,
}

impl PlacedBuilding {
    pub fn new(kind: BuildingKind, position: Position, rotation: Rotation) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycles() {
        let mut r = Rotation::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(r.quarter_turns());
            r = r.next();
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 0]);
        assert_eq!(Rotation::R3.degrees(), 270);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = PlacedBuilding::new(BuildingKind::Wall, Position::new(1, 1), Rotation::R0);
        let b = PlacedBuilding::new(BuildingKind::Wall, Position::new(1, 1), Rotation::R0);
        assert_ne!(a.id, b.id);
    }
}

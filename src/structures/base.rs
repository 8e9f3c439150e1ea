//! The ordered set of buildings standing on the map.

use serde::{Deserialize, Serialize};

use super::{BuildingKind, PlacedBuilding};
use crate::world::Position;

/// The player's base: every placed building, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Base {
    buildings: Vec<PlacedBuilding>,
}

impl Base {
    pub fn new() -> Self {
        Self::default()
    }

    /// Building standing at a position, if any
    pub fn at(&self, pos: Position) -> Option<&PlacedBuilding> {
        self.buildings.iter().find(|b| b.position == pos)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.at(pos).is_some()
    }

    pub(crate) fn insert(&mut self, building: PlacedBuilding) {
        self.buildings.push(building);
    }

    /// Remove and return the building at a position
    pub(crate) fn remove_at(&mut self, pos: Position) -> Option<PlacedBuilding> {
        let idx = self.buildings.iter().position(|b| b.position == pos)?;
        Some(self.buildings.remove(idx))
    }

    pub fn count(&self, kind: BuildingKind) -> usize {
        self.buildings.iter().filter(|b| b.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedBuilding> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::Rotation;

    #[test]
    fn test_insert_lookup_remove() {
        let mut base = Base::new();
        let pos = Position::new(3, 4);
        base.insert(PlacedBuilding::new(BuildingKind::Farm, pos, Rotation::R2));
        base.insert(PlacedBuilding::new(BuildingKind::Farm, Position::new(5, 4), Rotation::R0));

        assert!(base.is_occupied(pos));
        assert_eq!(base.count(BuildingKind::Farm), 2);
        assert_eq!(base.at(pos).map(|b| b.rotation), Some(Rotation::R2));

        let removed = base.remove_at(pos).unwrap();
        assert_eq!(removed.kind, BuildingKind::Farm);
        assert!(!base.is_occupied(pos));
        assert_eq!(base.len(), 1);
        assert!(base.remove_at(pos).is_none());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut base = Base::new();
        for (i, kind) in BuildingKind::all().iter().enumerate() {
            base.insert(PlacedBuilding::new(*kind, Position::new(i as i32, 0), Rotation::R0));
        }
        let kinds: Vec<_> = base.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, BuildingKind::all());
    }
}

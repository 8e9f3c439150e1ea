//! Build mode: selecting, previewing, placing and dismantling buildings.
//!
//! Rejected actions never raise. They come back as `Rejected` outcomes with a
//! reason the caller may surface or ignore, and leave all state untouched.

use serde::{Deserialize, Serialize};

use crate::ledger::ResourceLedger;
use crate::structures::{Base, BuildingKind, PlacedBuilding, Rotation};
use crate::world::{Grid, Position, Tile};

/// Transient build-mode state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMode {
    pub active: bool,
    pub selected: Option<BuildingKind>,
    /// Cell under the cursor, where the ghost is drawn
    pub ghost: Option<Position>,
    pub rotation: Rotation,
}

impl BuildMode {
    /// Flip build mode. Entering with nothing selected picks the wall;
    /// leaving drops the ghost.
    pub fn toggle(&mut self) {
        if self.active {
            self.exit();
        } else {
            self.active = true;
            if self.selected.is_none() {
                self.selected = Some(BuildingKind::Wall);
            }
        }
    }

    pub fn exit(&mut self) {
        self.active = false;
        self.ghost = None;
    }

    /// Choose a building kind; ignored outside build mode
    pub fn select(&mut self, kind: BuildingKind) -> bool {
        if !self.active {
            return false;
        }
        self.selected = Some(kind);
        true
    }

    pub fn deselect(&mut self) {
        if self.active {
            self.selected = None;
        }
    }

    pub fn hover(&mut self, pos: Position) {
        if self.active {
            self.ghost = Some(pos);
        }
    }

    pub fn rotate(&mut self) {
        if self.active {
            self.rotation = self.rotation.next();
        }
    }
}

/// Why a placement did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaceRejection {
    NotInBuildMode,
    NoSelection,
    NoCursor,
    OutOfBounds,
    NotFloor(Tile),
    Occupied,
    InsufficientScrap { have: u32, need: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaceOutcome {
    Built(PlacedBuilding),
    Rejected(PlaceRejection),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DismantleOutcome {
    Dismantled { building: PlacedBuilding, refund: u32 },
    /// Nothing stood there
    Empty,
}

/// Why a cell cannot take a building, ignoring cost
pub fn placement_blocker(grid: &Grid, base: &Base, pos: Position) -> Option<PlaceRejection> {
    match grid.get(pos) {
        None => Some(PlaceRejection::OutOfBounds),
        Some(tile) if !tile.is_buildable() => Some(PlaceRejection::NotFloor(tile)),
        Some(_) if base.is_occupied(pos) => Some(PlaceRejection::Occupied),
        Some(_) => None,
    }
}

/// True iff the cell is in bounds, open floor and free of buildings
pub fn can_place_at(grid: &Grid, base: &Base, pos: Position) -> bool {
    placement_blocker(grid, base, pos).is_none()
}

/// Place a building, debiting its exact cost in scrap
pub fn place(
    grid: &Grid,
    base: &mut Base,
    ledger: &mut ResourceLedger,
    kind: BuildingKind,
    pos: Position,
    rotation: Rotation,
) -> PlaceOutcome {
    if let Some(reason) = placement_blocker(grid, base, pos) {
        return PlaceOutcome::Rejected(reason);
    }
    let cost = kind.cost();
    if !ledger.spend_scrap(cost) {
        return PlaceOutcome::Rejected(PlaceRejection::InsufficientScrap {
            have: ledger.scrap,
            need: cost,
        });
    }

    let building = PlacedBuilding::new(kind, pos, rotation);
    base.insert(building.clone());
    PlaceOutcome::Built(building)
}

/// Remove the building at a cell and refund part of its cost
pub fn dismantle(
    base: &mut Base,
    ledger: &mut ResourceLedger,
    pos: Position,
    refund_ratio: f64,
) -> DismantleOutcome {
    match base.remove_at(pos) {
        Some(building) => {
            let refund = building.kind.entry().refund(refund_ratio);
            ledger.add_scrap(refund);
            DismantleOutcome::Dismantled { building, refund }
        }
        None => DismantleOutcome::Empty,
    }
}

/// Place the selected kind at a cell using the build-mode state
pub fn place_selected(
    mode: &BuildMode,
    grid: &Grid,
    base: &mut Base,
    ledger: &mut ResourceLedger,
    pos: Position,
) -> PlaceOutcome {
    if !mode.active {
        return PlaceOutcome::Rejected(PlaceRejection::NotInBuildMode);
    }
    let Some(kind) = mode.selected else {
        return PlaceOutcome::Rejected(PlaceRejection::NoSelection);
    };
    place(grid, base, ledger, kind, pos, mode.rotation)
}

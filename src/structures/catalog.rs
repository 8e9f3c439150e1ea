//! Static building catalog: cost and daily effect per kind.

use serde::Serialize;

use super::BuildingKind;

/// Per-day contribution of a standing building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub food: u32,
    pub water: u32,
    pub defense: u32,
}

/// One row of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub kind: BuildingKind,
    pub name: &'static str,
    /// Scrap cost, always positive
    pub cost: u32,
    pub effect: Effect,
}

impl CatalogEntry {
    /// Scrap returned when dismantled at the given ratio, rounded down
    pub fn refund(&self, ratio: f64) -> u32 {
        (self.cost as f64 * ratio).floor() as u32
    }
}

const CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        kind: BuildingKind::Wall,
        name: "Wall",
        cost: 1,
        effect: Effect { food: 0, water: 0, defense: 0 },
    },
    CatalogEntry {
        kind: BuildingKind::Farm,
        name: "Farm",
        cost: 3,
        effect: Effect { food: 1, water: 0, defense: 0 },
    },
    CatalogEntry {
        kind: BuildingKind::Raincatcher,
        name: "Raincatcher",
        cost: 3,
        effect: Effect { food: 0, water: 1, defense: 0 },
    },
    CatalogEntry {
        kind: BuildingKind::Turret,
        name: "Turret",
        cost: 5,
        effect: Effect { food: 0, water: 0, defense: 2 },
    },
];

impl BuildingKind {
    /// Catalog entry for this kind
    pub fn entry(&self) -> &'static CatalogEntry {
        match self {
            BuildingKind::Wall => &CATALOG[0],
            BuildingKind::Farm => &CATALOG[1],
            BuildingKind::Raincatcher => &CATALOG[2],
            BuildingKind::Turret => &CATALOG[3],
        }
    }

    pub fn cost(&self) -> u32 {
        self.entry().cost
    }
}

/// All catalog entries, in display order
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Entries affordable with the given scrap
pub fn affordable(scrap: u32) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |e| e.cost <= scrap)
}

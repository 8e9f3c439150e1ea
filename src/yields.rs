//! Daily production from standing buildings.

use serde::Serialize;

use crate::ledger::ResourceLedger;
use crate::structures::{Base, BuildingKind};

/// What the base produced on one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyYield {
    pub food: u32,
    pub water: u32,
    pub farms: usize,
    pub raincatchers: usize,
}

impl DailyYield {
    pub fn is_empty(&self) -> bool {
        self.food == 0 && self.water == 0
    }
}

/// Tally the base's production, recounting every building
pub fn tally(base: &Base) -> DailyYield {
    let farms = base.count(BuildingKind::Farm);
    let raincatchers = base.count(BuildingKind::Raincatcher);
    let (food, water) = base.iter().fold((0, 0), |(food, water), b| {
        let effect = b.kind.entry().effect;
        (food + effect.food, water + effect.water)
    });
    DailyYield {
        food,
        water,
        farms,
        raincatchers,
    }
}

/// Credit a day's production. Day zero and an idle base produce nothing.
pub fn apply_daily_yield(day: u32, base: &Base, ledger: &mut ResourceLedger) -> Option<DailyYield> {
    if day == 0 {
        return None;
    }
    let produced = tally(base);
    if produced.is_empty() {
        return None;
    }
    ledger.add_food(produced.food);
    ledger.add_water(produced.water);
    Some(produced)
}

//! Resource counters and the morality/survival meters.

use serde::{Deserialize, Serialize};

/// Upper bound of both meters
pub const METER_MAX: u32 = 100;

/// The survivor's stockpile. Counters never go below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub food: u32,
    pub water: u32,
    pub scrap: u32,
    pub medicine: u32,
    pub ammunition: u32,
}

impl ResourceLedger {
    /// Salvage from a resource cache: one each of food, water and scrap
    pub fn collect_cache(&mut self) {
        self.food += 1;
        self.water += 1;
        self.scrap += 1;
    }

    pub fn can_afford(&self, scrap_cost: u32) -> bool {
        self.scrap >= scrap_cost
    }

    /// Debit scrap if there is enough; returns whether the debit happened
    pub fn spend_scrap(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.scrap -= cost;
        true
    }

    pub fn add_scrap(&mut self, amount: u32) {
        self.scrap += amount;
    }

    pub fn add_food(&mut self, amount: u32) {
        self.food += amount;
    }

    pub fn add_water(&mut self, amount: u32) {
        self.water += amount;
    }

    /// Remove food, stopping at zero
    pub fn consume_food(&mut self, amount: u32) {
        self.food = self.food.saturating_sub(amount);
    }

    /// Remove water, stopping at zero
    pub fn consume_water(&mut self, amount: u32) {
        self.water = self.water.saturating_sub(amount);
    }
}

/// Morality and survival, each clamped to 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meters {
    morality: u32,
    survival: u32,
}

impl Meters {
    pub fn new(morality: u32, survival: u32) -> Self {
        Self {
            morality: morality.min(METER_MAX),
            survival: survival.min(METER_MAX),
        }
    }

    pub fn morality(&self) -> u32 {
        self.morality
    }

    pub fn survival(&self) -> u32 {
        self.survival
    }

    pub fn adjust_morality(&mut self, delta: i32) {
        self.morality = apply_clamped(self.morality, delta);
    }

    pub fn adjust_survival(&mut self, delta: i32) {
        self.survival = apply_clamped(self.survival, delta);
    }
}

fn apply_clamped(value: u32, delta: i32) -> u32 {
    (value as i64 + delta as i64).clamp(0, METER_MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_cache() {
        let mut ledger = ResourceLedger::default();
        ledger.collect_cache();
        assert_eq!((ledger.food, ledger.water, ledger.scrap), (1, 1, 1));
        assert_eq!((ledger.medicine, ledger.ammunition), (0, 0));
    }

    #[test]
    fn test_spend_scrap_is_guarded() {
        let mut ledger = ResourceLedger {
            scrap: 2,
            ..Default::default()
        };
        assert!(!ledger.spend_scrap(3));
        assert_eq!(ledger.scrap, 2);
        assert!(ledger.spend_scrap(2));
        assert_eq!(ledger.scrap, 0);
    }

    #[test]
    fn test_consumption_stops_at_zero() {
        let mut ledger = ResourceLedger {
            food: 1,
            water: 0,
            ..Default::default()
        };
        ledger.consume_food(2);
        ledger.consume_water(1);
        assert_eq!((ledger.food, ledger.water), (0, 0));
    }

    #[test]
    fn test_meters_clamp() {
        let mut meters = Meters::new(98, 2);
        meters.adjust_morality(6);
        meters.adjust_survival(-3);
        assert_eq!(meters.morality(), 100);
        assert_eq!(meters.survival(), 0);

        let meters = Meters::new(250, 40);
        assert_eq!(meters.morality(), 100);
    }
}

//! Moral dilemmas: a starving family at the gate, and what you do about it.

use serde::{Deserialize, Serialize};

use crate::ledger::{Meters, ResourceLedger};

/// Prompt shown when a dilemma opens
pub const PROMPT: &str = "A starving family begs at your gate on a stormy night. Your stores are low.";

/// The two possible answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    /// Share last rations
    Share,
    /// Turn them away at gunpoint
    Refuse,
}

impl Choice {
    pub fn label(&self) -> &'static str {
        match self {
            Choice::Share => "Share last rations",
            Choice::Refuse => "Turn them away at gunpoint",
        }
    }

    /// Meter and ledger deltas for this answer
    pub fn consequences(&self) -> Consequences {
        match self {
            Choice::Share => Consequences {
                morality: 6,
                survival: -3,
                food: 2,
                water: 1,
            },
            Choice::Refuse => Consequences {
                morality: -6,
                survival: 4,
                food: 0,
                water: 0,
            },
        }
    }
}

/// Effect of one resolved dilemma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Consequences {
    pub morality: i32,
    pub survival: i32,
    /// Food given away
    pub food: u32,
    /// Water given away
    pub water: u32,
}

/// Apply a choice to the meters and stockpile, clamping everything
pub fn resolve(choice: Choice, meters: &mut Meters, ledger: &mut ResourceLedger) -> Consequences {
    let c = choice.consequences();
    meters.adjust_morality(c.morality);
    meters.adjust_survival(c.survival);
    ledger.consume_food(c.food);
    ledger.consume_water(c.water);
    c
}

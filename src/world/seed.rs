//! World seeds: the flavor, starting stock and map seed of one run.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::ResourceLedger;
use crate::rng::SeededRng;

/// Exclusive upper bound of entropy-drawn seeds (2^31 - 1)
const SEED_BOUND: u32 = 2_147_483_647;

/// How the world ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collapse {
    Aliens,
    CorporateAiMeltdown,
    ClimateDisaster,
    CapitalistCannibalism,
}

impl Collapse {
    pub const ALL: [Collapse; 4] = [
        Collapse::Aliens,
        Collapse::CorporateAiMeltdown,
        Collapse::ClimateDisaster,
        Collapse::CapitalistCannibalism,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collapse::Aliens => "Aliens",
            Collapse::CorporateAiMeltdown => "Corporate AI meltdown",
            Collapse::ClimateDisaster => "Climate disaster",
            Collapse::CapitalistCannibalism => "Capitalist cannibalism",
        }
    }
}

/// What kind of undead roams this world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adversary {
    HiveMind,
    Runners,
    Smart,
    CuteButDeadly,
}

impl Adversary {
    pub const ALL: [Adversary; 4] = [
        Adversary::HiveMind,
        Adversary::Runners,
        Adversary::Smart,
        Adversary::CuteButDeadly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Adversary::HiveMind => "Hive mind",
            Adversary::Runners => "Runners",
            Adversary::Smart => "Smart",
            Adversary::CuteButDeadly => "Cute-but-deadly",
        }
    }
}

/// What the survivor did before the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupation {
    Dentist,
    Influencer,
    RetiredHitman,
    Barista,
    Sysadmin,
    Paramedic,
}

impl Occupation {
    pub const ALL: [Occupation; 6] = [
        Occupation::Dentist,
        Occupation::Influencer,
        Occupation::RetiredHitman,
        Occupation::Barista,
        Occupation::Sysadmin,
        Occupation::Paramedic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Occupation::Dentist => "Dentist",
            Occupation::Influencer => "Influencer",
            Occupation::RetiredHitman => "Retired hitman",
            Occupation::Barista => "Barista",
            Occupation::Sysadmin => "Sysadmin",
            Occupation::Paramedic => "Paramedic",
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        })*
    };
}

display_by_name!(Collapse, Adversary, Occupation);

/// Everything that defines one run before it starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSeed {
    /// Seeds both this record's derivation and the map
    pub world_seed: u32,
    pub cause_of_collapse: Collapse,
    pub adversary: Adversary,
    pub former_job: Occupation,
    pub starting_resources: ResourceLedger,
    /// Baseline meters, 40..=60
    pub base_morality: u32,
    pub base_survival: u32,
    /// Generated for future hazard spawning; no system reads it yet
    pub initial_zombie_density: f64,
}

impl WorldSeed {
    /// Draw a fresh seed from process entropy
    pub fn generate() -> Self {
        let seed = rand::thread_rng().gen_range(0..SEED_BOUND);
        Self::from_seed(seed)
    }

    /// Derive the full record from a seed; the draw order is fixed
    pub fn from_seed(world_seed: u32) -> Self {
        let mut rng = SeededRng::new(world_seed);

        let starting_resources = ResourceLedger {
            food: rng.range(15, 20),
            water: rng.range(15, 20),
            scrap: rng.range(5, 25),
            medicine: rng.range(2, 8),
            ammunition: rng.range(8, 30),
        };
        let base_morality = rng.range(40, 21);
        let base_survival = rng.range(40, 21);
        let initial_zombie_density = ((0.1 + rng.next_f64() * 0.5) * 100.0).round() / 100.0;

        let cause_of_collapse = *rng.pick(&Collapse::ALL);
        let adversary = *rng.pick(&Adversary::ALL);
        let former_job = *rng.pick(&Occupation::ALL);

        Self {
            world_seed,
            cause_of_collapse,
            adversary,
            former_job,
            starting_resources,
            base_morality,
            base_survival,
            initial_zombie_density,
        }
    }

    /// One-paragraph summary for the seed screen and logs
    pub fn describe(&self) -> String {
        format!(
            "Seed {}: the world fell to {}. The dead are {}. You were a {}. Zombie density {:.2}.",
            self.world_seed,
            self.cause_of_collapse.name().to_lowercase(),
            self.adversary.name().to_lowercase(),
            self.former_job.name().to_lowercase(),
            self.initial_zombie_density
        )
    }
}

//! Observer protocol types for viewing game state.
//!
//! This module defines the view types that clients use to observe a run.
//! The views are read-only snapshots that decouple clients from engine internals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dilemma::{self, Choice};
use crate::engine::{Engine, Phase, Run};
use crate::ledger::ResourceLedger;
use crate::observation::{Event, EventType};
use crate::structures::{self, BuildingKind};
use crate::world::{Position, Tile};

/// View of an entire run, as drawn on the play screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunView {
    pub phase: Phase,
    pub day: u32,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellView>,
    pub player: Position,
    pub resources: ResourceLedger,
    pub morality: u32,
    pub survival: u32,
    pub build: BuildView,
    pub dilemma: Option<DilemmaView>,
    pub seed: SeedView,
    pub recent_events: Vec<EventView>,
}

/// View of a single cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellView {
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
    pub building: Option<BuildingView>,
    pub player: bool,
}

/// View of a placed building for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingView {
    pub id: Uuid,
    pub kind: BuildingKind,
    pub display_name: String,
    pub rotation_degrees: u16,
}

/// View of the build toolbar and cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildView {
    pub active: bool,
    pub selected: Option<BuildingKind>,
    pub rotation_degrees: u16,
    pub ghost: Option<GhostView>,
    pub palette: Vec<PaletteEntryView>,
}

/// Preview of the selected building under the cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostView {
    pub position: Position,
    pub kind: Option<BuildingKind>,
    /// Placeable and affordable right now
    pub valid: bool,
}

/// One toolbar slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntryView {
    /// Number key that selects it
    pub hotkey: char,
    pub kind: BuildingKind,
    pub name: String,
    pub cost: u32,
    pub affordable: bool,
    pub selected: bool,
}

/// The open moral-choice prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DilemmaView {
    pub prompt: String,
    pub options: Vec<ChoiceView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceView {
    pub choice: Choice,
    pub label: String,
    pub morality: i32,
    pub survival: i32,
}

/// View of the world seed, as shown on the seed screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedView {
    pub world_seed: u32,
    pub cause_of_collapse: String,
    pub adversary: String,
    pub former_job: String,
    pub starting_resources: ResourceLedger,
    pub base_morality: u32,
    pub base_survival: u32,
    pub initial_zombie_density: f64,
}

/// View of an event for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub day: u32,
    pub description: String,
    pub event_type: EventViewType,
}

/// Simplified event types for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventViewType {
    Run,
    Scavenge,
    Terminal,
    Construction,
    Harvest,
    Dilemma,
}

impl RunView {
    pub fn from_engine(engine: &Engine) -> Self {
        let run = engine.run();
        let width = run.grid.width();
        let height = run.grid.height();

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in run.grid.rows().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let building = run.base.at(pos).map(|b| BuildingView {
                    id: b.id,
                    kind: b.kind,
                    display_name: b.kind.display_name().to_string(),
                    rotation_degrees: b.rotation.degrees(),
                });
                cells.push(CellView {
                    x: pos.x,
                    y: pos.y,
                    tile: *tile,
                    building,
                    player: pos == run.player,
                });
            }
        }

        let dilemma = run.dilemma_open.then(DilemmaView::current);

        Self {
            phase: engine.phase(),
            day: run.day,
            width,
            height,
            cells,
            player: run.player,
            resources: run.ledger,
            morality: run.meters.morality(),
            survival: run.meters.survival(),
            build: BuildView::from_engine(engine),
            dilemma,
            seed: SeedView::from_run(run),
            recent_events: engine.recent_event_views(),
        }
    }

    /// Get cell at coordinates
    pub fn get(&self, x: i32, y: i32) -> Option<&CellView> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells.get(y as usize * self.width + x as usize)
        } else {
            None
        }
    }
}

impl BuildView {
    fn from_engine(engine: &Engine) -> Self {
        let run = engine.run();
        let mode = &run.build;

        let ghost = mode.ghost.map(|position| GhostView {
            position,
            kind: mode.selected,
            valid: engine.ghost_valid(),
        });

        let affordable: Vec<BuildingKind> = structures::affordable(run.ledger.scrap)
            .map(|entry| entry.kind)
            .collect();
        let palette = structures::catalog()
            .iter()
            .zip('1'..)
            .map(|(entry, hotkey)| PaletteEntryView {
                hotkey,
                kind: entry.kind,
                name: entry.name.to_string(),
                cost: entry.cost,
                affordable: affordable.contains(&entry.kind),
                selected: mode.selected == Some(entry.kind),
            })
            .collect();

        Self {
            active: mode.active,
            selected: mode.selected,
            rotation_degrees: mode.rotation.degrees(),
            ghost,
            palette,
        }
    }
}

impl DilemmaView {
    pub fn current() -> Self {
        let options = [Choice::Share, Choice::Refuse]
            .into_iter()
            .map(|choice| {
                let c = choice.consequences();
                ChoiceView {
                    choice,
                    label: choice.label().to_string(),
                    morality: c.morality,
                    survival: c.survival,
                }
            })
            .collect();
        Self {
            prompt: dilemma::PROMPT.to_string(),
            options,
        }
    }
}

impl SeedView {
    pub fn from_run(run: &Run) -> Self {
        let seed = &run.seed;
        Self {
            world_seed: seed.world_seed,
            cause_of_collapse: seed.cause_of_collapse.to_string(),
            adversary: seed.adversary.to_string(),
            former_job: seed.former_job.to_string(),
            starting_resources: seed.starting_resources,
            base_morality: seed.base_morality,
            base_survival: seed.base_survival,
            initial_zombie_density: seed.initial_zombie_density,
        }
    }
}

impl EventView {
    /// Create event views from raw events, dropping ones the HUD already shows
    pub fn from_events(events: &[Event]) -> Vec<Self> {
        events.iter().filter_map(Self::from_event).collect()
    }

    pub fn from_event(event: &Event) -> Option<Self> {
        let event_type = match event.event_type {
            EventType::DayAdvanced => return None,
            EventType::RunStarted => EventViewType::Run,
            EventType::Scavenged => EventViewType::Scavenge,
            EventType::TerminalAccessed => EventViewType::Terminal,
            EventType::Built | EventType::Dismantled => EventViewType::Construction,
            EventType::DailyYields => EventViewType::Harvest,
            EventType::DilemmaOpened | EventType::DilemmaResolved => EventViewType::Dilemma,
        };
        Some(Self {
            day: event.day,
            description: event.describe(),
            event_type,
        })
    }
}

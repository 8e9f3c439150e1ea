use tracing::{debug, info};

use crate::action::{Command, Direction};
use crate::build::{self, BuildMode, DismantleOutcome, PlaceOutcome, PlaceRejection};
use crate::config::GameConfig;
use crate::dilemma::{self, Choice};
use crate::error::ConfigError;
use crate::ledger::{Meters, ResourceLedger};
use crate::movement::{self, MoveOutcome};
use crate::observation::Event;
use crate::observer::{EventView, RunView, SeedView};
use crate::structures::Base;
use crate::world::{Grid, Position, WorldSeed};
use crate::yields;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// Inspecting the rolled world seed before committing to it
    SeedSelection,
    /// Playing
    Running,
}

/// All mutable state of one run. The engine is its single owner.
#[derive(Debug, Clone)]
pub struct Run {
    pub seed: WorldSeed,
    pub grid: Grid,
    pub player: Position,
    pub ledger: ResourceLedger,
    pub meters: Meters,
    pub base: Base,
    pub build: BuildMode,
    pub day: u32,
    pub dilemma_open: bool,
}

impl Run {
    pub fn new(seed: WorldSeed, config: &GameConfig) -> Self {
        let grid = Grid::generate_with(seed.world_seed, &config.map);
        Self::with_grid(seed, grid, config)
    }

    /// A run on a prepared grid instead of the seed's generated one
    pub fn with_grid(seed: WorldSeed, grid: Grid, config: &GameConfig) -> Self {
        Self {
            grid,
            player: Position::new(config.player.start_x, config.player.start_y),
            ledger: seed.starting_resources,
            meters: Meters::new(seed.base_morality, seed.base_survival),
            base: Base::new(),
            build: BuildMode::default(),
            day: 0,
            dilemma_open: false,
            seed,
        }
    }
}

/// The game engine: applies commands one at a time to the current run
pub struct Engine {
    config: GameConfig,
    phase: Phase,
    run: Run,
    /// Recent events for observer clients (last N days)
    recent_events: Vec<Event>,
    /// Maximum days of events to keep
    max_event_days: u32,
}

impl Engine {
    /// Create an engine with an entropy-drawn world seed
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, WorldSeed::generate())
    }

    /// Create an engine for a specific world seed.
    ///
    /// The config is validated before any map is generated from it.
    pub fn with_seed(config: GameConfig, seed: WorldSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let run = Run::new(seed, &config);
        Self::from_run(config, run)
    }

    /// Create an engine around a prepared run
    pub fn from_run(config: GameConfig, run: Run) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("{}", run.seed.describe());
        Ok(Self {
            config,
            phase: Phase::SeedSelection,
            run,
            recent_events: Vec::new(),
            max_event_days: 3,
        })
    }

    // ==================== Observer Interface ====================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn day(&self) -> u32 {
        self.run.day
    }

    /// Snapshot of the run for rendering
    pub fn run_view(&self) -> RunView {
        RunView::from_engine(self)
    }

    /// Snapshot of the pending seed for the seed screen
    pub fn seed_view(&self) -> SeedView {
        SeedView::from_run(&self.run)
    }

    pub fn recent_events(&self) -> &[Event] {
        &self.recent_events
    }

    pub fn recent_event_views(&self) -> Vec<EventView> {
        EventView::from_events(&self.recent_events)
    }

    /// True when the ghost cell could take the selected building right now
    pub fn ghost_valid(&self) -> bool {
        let build = &self.run.build;
        match (build.ghost, build.selected) {
            (Some(pos), Some(kind)) => {
                build::can_place_at(&self.run.grid, &self.run.base, pos)
                    && self.run.ledger.can_afford(kind.cost())
            }
            _ => false,
        }
    }

    // ==================== Command Handling ====================

    /// Apply one command to completion and return the events it produced.
    /// Commands that do not apply in the current state are ignored.
    pub fn handle(&mut self, command: Command) -> Vec<Event> {
        let events = match self.phase {
            Phase::SeedSelection => self.handle_seed_screen(command),
            Phase::Running => self.handle_running(command),
        };

        for event in &events {
            debug!("Event: {}", event.describe());
            self.recent_events.push(event.clone());
        }
        self.prune_old_events();

        events
    }

    fn handle_seed_screen(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::RerollSeed => {
                self.reset(WorldSeed::generate());
                Vec::new()
            }
            Command::StartRun => {
                self.phase = Phase::Running;
                info!("Run started with seed {}", self.run.seed.world_seed);
                vec![Event::run_started(self.run.day, &self.run.seed.describe())]
            }
            other => {
                debug!("Ignoring {:?} on the seed screen", other);
                Vec::new()
            }
        }
    }

    fn handle_running(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        let day = self.run.day;

        match command {
            Command::Move(direction) => self.move_player(direction, &mut events),

            Command::ToggleBuildMode => {
                self.run.build.toggle();
                debug!("Build mode {}", if self.run.build.active { "on" } else { "off" });
            }
            Command::ExitBuildMode => self.run.build.exit(),
            Command::SelectBuilding(kind) => {
                if !self.run.build.select(kind) {
                    debug!("Ignoring selection of {:?} outside build mode", kind);
                }
            }
            Command::Deselect => self.run.build.deselect(),
            Command::Hover(pos) => self.run.build.hover(pos),
            Command::Rotate => self.run.build.rotate(),

            Command::PlaceAtCursor => match self.run.build.ghost {
                Some(pos) => self.place(pos, &mut events),
                None => debug!("Placement rejected: {:?}", PlaceRejection::NoCursor),
            },
            Command::Place(pos) => self.place(pos, &mut events),
            Command::DismantleAtCursor => {
                if let Some(pos) = self.run.build.ghost {
                    self.dismantle(pos, &mut events);
                }
            }
            Command::Dismantle(pos) => self.dismantle(pos, &mut events),

            Command::TriggerDilemma | Command::DilemmaTick => self.open_dilemma(&mut events),
            Command::ResolveDilemma(choice) => self.resolve_dilemma(choice, &mut events),

            Command::DayTick => {
                self.run.day += 1;
                events.push(Event::day_advanced(self.run.day));
                if let Some(produced) =
                    yields::apply_daily_yield(self.run.day, &self.run.base, &mut self.run.ledger)
                {
                    info!(
                        "Day {}: {} farms and {} raincatchers produced +{} food, +{} water",
                        self.run.day, produced.farms, produced.raincatchers, produced.food, produced.water
                    );
                    events.push(Event::daily_yields(self.run.day, produced.food, produced.water));
                }
            }

            Command::NewRun => {
                info!("Run abandoned on day {}", day);
                self.reset(WorldSeed::generate());
            }

            Command::RerollSeed | Command::StartRun => {
                debug!("Ignoring {:?} during a run", command);
            }
        }

        events
    }

    fn move_player(&mut self, direction: Direction, events: &mut Vec<Event>) {
        if self.run.build.active {
            return;
        }
        let run = &mut self.run;
        let outcome = movement::step(
            &mut run.grid,
            &run.base,
            &mut run.player,
            &mut run.ledger,
            direction,
        );

        match outcome {
            MoveOutcome::Moved { to, scavenged, terminal, .. } => {
                if scavenged {
                    events.push(Event::scavenged(run.day, to));
                }
                if terminal {
                    events.push(Event::terminal_accessed(run.day, to));
                    self.open_dilemma(events);
                }
            }
            MoveOutcome::Blocked(blocker) => {
                debug!("Move {} blocked by {:?}", direction.name(), blocker);
            }
        }
    }

    fn place(&mut self, pos: Position, events: &mut Vec<Event>) {
        let run = &mut self.run;
        match build::place_selected(&run.build, &run.grid, &mut run.base, &mut run.ledger, pos) {
            PlaceOutcome::Built(building) => {
                let cost = building.kind.cost();
                info!(
                    "Built {} at ({}, {}) for {} scrap",
                    building.kind.display_name(),
                    pos.x,
                    pos.y,
                    cost
                );
                events.push(Event::built(run.day, building.kind, pos, cost));
            }
            PlaceOutcome::Rejected(reason) => {
                debug!("Placement at ({}, {}) rejected: {:?}", pos.x, pos.y, reason);
            }
        }
    }

    fn dismantle(&mut self, pos: Position, events: &mut Vec<Event>) {
        let run = &mut self.run;
        if !run.build.active {
            return;
        }
        match build::dismantle(&mut run.base, &mut run.ledger, pos, self.config.build.refund_ratio) {
            DismantleOutcome::Dismantled { building, refund } => {
                info!(
                    "Dismantled {} at ({}, {}), refunded {} scrap",
                    building.kind.display_name(),
                    pos.x,
                    pos.y,
                    refund
                );
                events.push(Event::dismantled(run.day, building.kind, pos, refund));
            }
            DismantleOutcome::Empty => debug!("Nothing to dismantle at ({}, {})", pos.x, pos.y),
        }
    }

    fn open_dilemma(&mut self, events: &mut Vec<Event>) {
        if self.run.dilemma_open {
            return;
        }
        self.run.dilemma_open = true;
        events.push(Event::dilemma_opened(self.run.day));
    }

    fn resolve_dilemma(&mut self, choice: Choice, events: &mut Vec<Event>) {
        let run = &mut self.run;
        if !run.dilemma_open {
            return;
        }
        dilemma::resolve(choice, &mut run.meters, &mut run.ledger);
        run.dilemma_open = false;
        info!(
            "Dilemma resolved with {:?}: morality {}, survival {}",
            choice,
            run.meters.morality(),
            run.meters.survival()
        );
        events.push(Event::dilemma_resolved(run.day, choice));
    }

    /// Replace the run wholesale and return to the seed screen
    fn reset(&mut self, seed: WorldSeed) {
        self.run = Run::new(seed, &self.config);
        self.phase = Phase::SeedSelection;
        self.recent_events.clear();
        info!("{}", self.run.seed.describe());
    }

    /// Prune events older than max_event_days
    fn prune_old_events(&mut self) {
        let cutoff = self.run.day.saturating_sub(self.max_event_days);
        self.recent_events.retain(|e| e.day >= cutoff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::EventType;
    use crate::structures::BuildingKind;
    use crate::world::Tile;

    /// Engine on a 6x4 floor map: wall at (3,2), cache at (2,1), terminal at (1,2)
    fn engine(scrap: u32) -> Engine {
        let config = GameConfig::default();
        let mut seed = WorldSeed::from_seed(42);
        seed.starting_resources = ResourceLedger {
            scrap,
            food: 10,
            water: 10,
            ..Default::default()
        };
        seed.base_morality = 50;
        seed.base_survival = 50;

        let mut grid = Grid::filled(6, 4, Tile::Floor);
        grid.set(Position::new(3, 2), Tile::Wall);
        grid.set(Position::new(2, 1), Tile::Resource);
        grid.set(Position::new(1, 2), Tile::Terminal);

        let mut engine = Engine::from_run(config.clone(), Run::with_grid(seed, grid, &config)).unwrap();
        engine.handle(Command::StartRun);
        engine
    }

    fn has(events: &[Event], event_type: EventType) -> bool {
        events.iter().any(|e| e.event_type == event_type)
    }

    #[test]
    fn test_rejects_empty_map() {
        let mut config = GameConfig::default();
        config.map.width = 0;
        let result = Engine::with_seed(config.clone(), WorldSeed::from_seed(42));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "map.width/map.height", .. })
        ));

        let run = Run::with_grid(WorldSeed::from_seed(42), Grid::filled(0, 16, Tile::Floor), &config);
        assert!(Engine::from_run(config, run).is_err());
    }

    #[test]
    fn test_starts_on_seed_screen() {
        let mut engine = Engine::with_seed(GameConfig::default(), WorldSeed::from_seed(42)).unwrap();
        assert_eq!(engine.phase(), Phase::SeedSelection);
        assert!(engine.handle(Command::Move(Direction::Down)).is_empty());
        assert_eq!(engine.run().player, Position::new(2, 2));

        let events = engine.handle(Command::StartRun);
        assert!(has(&events, EventType::RunStarted));
        assert!(engine.is_running());
    }

    #[test]
    fn test_reroll_replaces_seed() {
        let mut engine = Engine::with_seed(GameConfig::default(), WorldSeed::from_seed(42)).unwrap();
        let before = engine.run().seed.clone();
        // A fresh draw colliding with seed 42 is possible but vanishingly rare.
        engine.handle(Command::RerollSeed);
        engine.handle(Command::RerollSeed);
        assert_ne!(engine.run().seed, before);
        assert_eq!(engine.run().ledger, engine.run().seed.starting_resources);
        assert_eq!(engine.phase(), Phase::SeedSelection);
    }

    #[test]
    fn test_scavenge_through_engine() {
        let mut engine = engine(0);
        let events = engine.handle(Command::Move(Direction::Up));
        assert!(has(&events, EventType::Scavenged));
        assert_eq!(engine.run().ledger.scrap, 1);
        assert_eq!(engine.run().grid.get(Position::new(2, 1)), Some(Tile::Floor));
    }

    #[test]
    fn test_terminal_opens_dilemma_and_movement_continues() {
        let mut engine = engine(0);
        let events = engine.handle(Command::Move(Direction::Left));
        assert!(has(&events, EventType::TerminalAccessed));
        assert!(has(&events, EventType::DilemmaOpened));
        assert!(engine.run().dilemma_open);

        // The prompt stays open while the player walks away from the terminal
        engine.handle(Command::Move(Direction::Right));
        assert_eq!(engine.run().player, Position::new(2, 2));
        assert!(engine.run().dilemma_open);

        let events = engine.handle(Command::ResolveDilemma(Choice::Share));
        assert!(has(&events, EventType::DilemmaResolved));
        assert!(!engine.run().dilemma_open);
        let run = engine.run();
        assert_eq!(
            (run.meters.morality(), run.meters.survival(), run.ledger.food, run.ledger.water),
            (56, 47, 8, 9)
        );
    }

    #[test]
    fn test_resolve_without_prompt_is_noop() {
        let mut engine = engine(0);
        assert!(engine.handle(Command::ResolveDilemma(Choice::Refuse)).is_empty());
        assert_eq!(engine.run().meters.morality(), 50);
    }

    #[test]
    fn test_refuse_through_engine() {
        let mut engine = engine(0);
        engine.handle(Command::TriggerDilemma);
        engine.handle(Command::ResolveDilemma(Choice::Refuse));
        let run = engine.run();
        assert_eq!(
            (run.meters.morality(), run.meters.survival(), run.ledger.food, run.ledger.water),
            (44, 54, 10, 10)
        );
    }

    #[test]
    fn test_movement_ignored_in_build_mode() {
        let mut engine = engine(0);
        engine.handle(Command::ToggleBuildMode);
        engine.handle(Command::Move(Direction::Down));
        assert_eq!(engine.run().player, Position::new(2, 2));
        engine.handle(Command::ExitBuildMode);
        engine.handle(Command::Move(Direction::Down));
        assert_eq!(engine.run().player, Position::new(2, 3));
    }

    #[test]
    fn test_place_and_dismantle_at_cursor() {
        let mut engine = engine(10);
        engine.handle(Command::ToggleBuildMode);
        engine.handle(Command::SelectBuilding(BuildingKind::Turret));
        engine.handle(Command::Hover(Position::new(4, 0)));
        assert!(engine.ghost_valid());

        let events = engine.handle(Command::PlaceAtCursor);
        assert!(has(&events, EventType::Built));
        assert_eq!(engine.run().ledger.scrap, 5);
        assert!(!engine.ghost_valid());

        let events = engine.handle(Command::DismantleAtCursor);
        assert!(has(&events, EventType::Dismantled));
        assert_eq!(engine.run().ledger.scrap, 7);
        assert!(engine.run().base.is_empty());
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let mut engine = engine(10);
        engine.handle(Command::ToggleBuildMode);
        let before = engine.run().ledger;
        for pos in [Position::new(3, 2), Position::new(2, 1), Position::new(1, 2), Position::new(9, 9)] {
            assert!(engine.handle(Command::Place(pos)).is_empty());
        }
        assert_eq!(engine.run().ledger, before);
        assert!(engine.run().base.is_empty());
    }

    #[test]
    fn test_placed_building_blocks_player() {
        let mut engine = engine(10);
        engine.handle(Command::ToggleBuildMode);
        engine.handle(Command::Place(Position::new(2, 3)));
        engine.handle(Command::ToggleBuildMode);
        engine.handle(Command::Move(Direction::Down));
        assert_eq!(engine.run().player, Position::new(2, 2));
    }

    #[test]
    fn test_day_ticks_apply_yields() {
        let mut engine = engine(10);
        engine.handle(Command::ToggleBuildMode);
        engine.handle(Command::SelectBuilding(BuildingKind::Farm));
        engine.handle(Command::Place(Position::new(0, 0)));
        engine.handle(Command::Place(Position::new(1, 0)));
        engine.handle(Command::SelectBuilding(BuildingKind::Raincatcher));
        engine.handle(Command::Place(Position::new(0, 3)));
        assert_eq!(engine.run().ledger.scrap, 1);

        let events = engine.handle(Command::DayTick);
        assert_eq!(engine.day(), 1);
        assert!(has(&events, EventType::DailyYields));
        assert_eq!((engine.run().ledger.food, engine.run().ledger.water), (12, 11));
    }

    #[test]
    fn test_dilemma_tick_is_idempotent() {
        let mut engine = engine(0);
        assert_eq!(engine.handle(Command::DilemmaTick).len(), 1);
        assert!(engine.handle(Command::DilemmaTick).is_empty());
        assert!(engine.run().dilemma_open);
    }

    #[test]
    fn test_new_run_resets_everything() {
        let mut engine = engine(10);
        engine.handle(Command::ToggleBuildMode);
        engine.handle(Command::Rotate);
        engine.handle(Command::Place(Position::new(0, 0)));
        engine.handle(Command::DayTick);
        engine.handle(Command::TriggerDilemma);

        engine.handle(Command::NewRun);
        let run = engine.run();
        assert_eq!(engine.phase(), Phase::SeedSelection);
        assert_eq!(run.day, 0);
        assert!(run.base.is_empty());
        assert_eq!(run.build, BuildMode::default());
        assert!(!run.dilemma_open);
        assert_eq!(run.player, Position::new(2, 2));
        assert_eq!(run.ledger, run.seed.starting_resources);
        assert_eq!(run.meters.morality(), run.seed.base_morality);
        assert!(engine.recent_events().is_empty());
        assert_eq!(run.grid.width(), 24);
    }

    #[test]
    fn test_old_events_pruned() {
        let mut engine = engine(0);
        for _ in 0..10 {
            engine.handle(Command::DayTick);
        }
        assert!(engine.recent_events().iter().all(|e| e.day >= 7));
    }
}

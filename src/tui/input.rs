//! Input handling for the TUI.
//!
//! Keys and mouse events are translated into engine commands here; nothing in
//! this module mutates the run directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::App;
use crate::action::{Command, Direction};
use crate::dilemma::Choice;
use crate::engine::{Engine, Phase};
use crate::structures::BuildingKind;

/// What a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Quit,
    Commands(Vec<Command>),
}

impl InputOutcome {
    fn none() -> Self {
        InputOutcome::Commands(Vec::new())
    }

    fn one(command: Command) -> Self {
        InputOutcome::Commands(vec![command])
    }
}

/// Handle a key event
pub fn handle_key(key: KeyEvent, app: &mut App, engine: &Engine) -> InputOutcome {
    // Help overlay handling
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return InputOutcome::none();
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputOutcome::Quit,
        KeyCode::Char('?') => {
            app.toggle_help();
            return InputOutcome::none();
        }
        _ => {}
    }

    match engine.phase() {
        Phase::SeedSelection => seed_screen_key(key),
        Phase::Running if engine.run().dilemma_open => dilemma_key(key),
        Phase::Running => run_key(key, engine),
    }
}

fn seed_screen_key(key: KeyEvent) -> InputOutcome {
    match key.code {
        KeyCode::Enter => InputOutcome::one(Command::StartRun),
        KeyCode::Char('r') | KeyCode::Char('R') => InputOutcome::one(Command::RerollSeed),
        _ => InputOutcome::none(),
    }
}

/// The prompt is modal: only an answer (or a new run) gets through
fn dilemma_key(key: KeyEvent) -> InputOutcome {
    if is_new_run(&key) {
        return InputOutcome::one(Command::NewRun);
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('1') => {
            InputOutcome::one(Command::ResolveDilemma(Choice::Share))
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('2') => {
            InputOutcome::one(Command::ResolveDilemma(Choice::Refuse))
        }
        _ => InputOutcome::none(),
    }
}

fn run_key(key: KeyEvent, engine: &Engine) -> InputOutcome {
    if is_new_run(&key) {
        return InputOutcome::one(Command::NewRun);
    }

    let run = engine.run();
    let building = run.build.active;

    if let Some(direction) = direction_for(key.code) {
        if building {
            let from = run.build.ghost.unwrap_or(run.player);
            let to = run.grid.clamp(from.step(direction));
            return InputOutcome::one(Command::Hover(to));
        }
        return InputOutcome::one(Command::Move(direction));
    }

    let commands = match key.code {
        // Build mode
        KeyCode::Char('b') | KeyCode::Char('B') => {
            vec![Command::ToggleBuildMode, Command::Hover(run.player)]
        }
        KeyCode::Esc => vec![Command::ExitBuildMode],
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            let Some(kind) = BuildingKind::all().get(index) else {
                return InputOutcome::none();
            };
            let mut commands = Vec::new();
            if !building {
                commands.push(Command::ToggleBuildMode);
                commands.push(Command::Hover(run.player));
            }
            commands.push(Command::SelectBuilding(*kind));
            commands
        }
        KeyCode::Char('r') | KeyCode::Char('R') => vec![Command::Rotate],
        KeyCode::Char('c') | KeyCode::Char('C') => vec![Command::Deselect],
        KeyCode::Char('x') | KeyCode::Char('X') => vec![Command::DismantleAtCursor],
        KeyCode::Enter | KeyCode::Char(' ') => vec![Command::PlaceAtCursor],

        // Dilemmas
        KeyCode::Char('t') | KeyCode::Char('T') => vec![Command::TriggerDilemma],

        _ => Vec::new(),
    };
    InputOutcome::Commands(commands)
}

/// Handle a mouse event over the map
pub fn handle_mouse(mouse: MouseEvent, app: &App, engine: &Engine) -> Vec<Command> {
    let run = engine.run();
    if !engine.is_running() || run.dilemma_open || !run.build.active || app.show_help {
        return Vec::new();
    }
    let Some(cell) = app.cell_at(mouse.column, mouse.row) else {
        return Vec::new();
    };

    match mouse.kind {
        MouseEventKind::Moved => vec![Command::Hover(cell)],
        MouseEventKind::Down(MouseButton::Left) => vec![Command::Hover(cell), Command::Place(cell)],
        MouseEventKind::Down(MouseButton::Right) => vec![Command::Deselect],
        _ => Vec::new(),
    }
}

fn is_new_run(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char(c) => Direction::from_wasd(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::world::{Position, WorldSeed};
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn running() -> Engine {
        let mut engine = Engine::with_seed(GameConfig::default(), WorldSeed::from_seed(42)).unwrap();
        engine.handle(Command::StartRun);
        engine
    }

    fn send(engine: &mut Engine, outcome: InputOutcome) {
        if let InputOutcome::Commands(commands) = outcome {
            for command in commands {
                engine.handle(command);
            }
        }
    }

    #[test]
    fn test_seed_screen_keys() {
        let mut app = App::new();
        let engine = Engine::with_seed(GameConfig::default(), WorldSeed::from_seed(42)).unwrap();
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut app, &engine),
            InputOutcome::one(Command::StartRun)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut app, &engine),
            InputOutcome::one(Command::RerollSeed)
        );
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut app, &engine), InputOutcome::Quit);
    }

    #[test]
    fn test_arrows_and_wasd_move() {
        let mut app = App::new();
        let engine = running();
        for (code, dir) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('S'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('d'), Direction::Right),
        ] {
            assert_eq!(
                handle_key(key(code), &mut app, &engine),
                InputOutcome::one(Command::Move(dir))
            );
        }
    }

    #[test]
    fn test_number_key_enters_build_mode() {
        let mut app = App::new();
        let mut engine = running();
        let outcome = handle_key(key(KeyCode::Char('3')), &mut app, &engine);
        send(&mut engine, outcome);
        assert!(engine.run().build.active);
        assert_eq!(engine.run().build.selected, Some(BuildingKind::Raincatcher));
        assert_eq!(engine.run().build.ghost, Some(Position::new(2, 2)));

        let outcome = handle_key(key(KeyCode::Right), &mut app, &engine);
        assert_eq!(outcome, InputOutcome::one(Command::Hover(Position::new(3, 2))));
    }

    #[test]
    fn test_dilemma_is_modal() {
        let mut app = App::new();
        let mut engine = running();
        engine.handle(Command::TriggerDilemma);
        assert_eq!(handle_key(key(KeyCode::Up), &mut app, &engine), InputOutcome::none());
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut app, &engine),
            InputOutcome::one(Command::ResolveDilemma(Choice::Share))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('2')), &mut app, &engine),
            InputOutcome::one(Command::ResolveDilemma(Choice::Refuse))
        );
    }

    #[test]
    fn test_ctrl_r_starts_new_run() {
        let mut app = App::new();
        let engine = running();
        let ctrl_r = KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(ctrl_r, &mut app, &engine), InputOutcome::one(Command::NewRun));
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut app, &engine),
            InputOutcome::one(Command::Rotate)
        );
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = App::new();
        let engine = running();
        handle_key(key(KeyCode::Char('?')), &mut app, &engine);
        assert!(app.show_help);
        assert_eq!(handle_key(key(KeyCode::Up), &mut app, &engine), InputOutcome::none());
        handle_key(key(KeyCode::Esc), &mut app, &engine);
        assert!(!app.show_help);
    }

    #[test]
    fn test_mouse_only_in_build_mode() {
        let mut app = App::new();
        app.map_area = Rect::new(1, 1, 48, 16);
        let mut engine = running();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert!(handle_mouse(click, &app, &engine).is_empty());

        engine.handle(Command::ToggleBuildMode);
        let cell = Position::new(2, 1);
        assert_eq!(
            handle_mouse(click, &app, &engine),
            vec![Command::Hover(cell), Command::Place(cell)]
        );
    }
}

//! Terminal client for After Humanity.
//!
//! Keyboard, mouse and timer input all become [`Command`]s on one channel;
//! the loop drains it into the engine between frames.

mod app;
mod input;
mod ui;
mod widgets;

pub use app::App;
pub use input::InputOutcome;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{info, trace};

use crate::action::Command;
use crate::engine::Engine;
use crate::scheduler::TickScheduler;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI application
pub async fn run(mut engine: Engine) -> Result<()> {
    // Initialize terminal
    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = unbounded_channel();
    let mut scheduler = TickScheduler::from_config(&engine.config().timing, tx.clone());
    let mut app = App::new();

    // Main loop
    let result = run_app(&mut terminal, &mut engine, &mut app, &tx, &mut rx, &mut scheduler).await;

    scheduler.stop();
    info!("Leaving on day {}", engine.day());

    // Restore terminal
    restore_terminal(&mut terminal)?;

    result
}

/// Set up the terminal for TUI rendering
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main application loop
async fn run_app(
    terminal: &mut Tui,
    engine: &mut Engine,
    app: &mut App,
    tx: &UnboundedSender<Command>,
    rx: &mut UnboundedReceiver<Command>,
    scheduler: &mut TickScheduler,
) -> Result<()> {
    let frame_rate = Duration::from_millis(50);

    loop {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, engine, app))?;

        // Handle input with timeout
        if event::poll(frame_rate)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match input::handle_key(key, app, engine) {
                        InputOutcome::Quit => break,
                        InputOutcome::Commands(commands) => {
                            for command in commands {
                                tx.send(command)?;
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    for command in input::handle_mouse(mouse, app, engine) {
                        tx.send(command)?;
                    }
                }
                _ => {}
            }
        }

        // Apply everything queued since the last frame, in arrival order
        while let Ok(command) = rx.try_recv() {
            if !command.is_tick() {
                trace!("Command: {:?}", command);
            }
            // A fresh run gets fresh timers
            if matches!(command, Command::NewRun | Command::StartRun) {
                scheduler.stop();
            }
            let events = engine.handle(command);
            app.push_events(&events);
        }

        // Timers run only while a run is in progress
        if engine.is_running() && !scheduler.is_running() {
            scheduler.start();
        } else if !engine.is_running() && scheduler.is_running() {
            scheduler.stop();
        }

        app.expire_toasts();

        // Let the timer tasks make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

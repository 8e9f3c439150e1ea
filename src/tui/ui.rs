//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::widgets;
use super::App;
use crate::engine::{Engine, Phase};
use crate::observer::{DilemmaView, RunView, SeedView};

/// Draw the entire UI
pub fn draw(frame: &mut Frame, engine: &Engine, app: &mut App) {
    match engine.phase() {
        Phase::SeedSelection => draw_seed_screen(frame, &engine.seed_view()),
        Phase::Running => draw_run(frame, &engine.run_view(), app),
    }

    let area = frame.area();
    widgets::toasts::draw(frame, area, &app.toasts);

    // Draw help overlay if active
    if app.show_help {
        draw_help(frame);
    }
}

/// Seed screen: the rolled world, before committing to it
fn draw_seed_screen(frame: &mut Frame, seed: &SeedView) {
    let area = centered(frame.area(), 56, 18);
    frame.render_widget(Clear, area);

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::DarkGray);
    let r = &seed.starting_resources;

    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", name), label),
            Span::raw(value),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("AFTER HUMANITY", heading)),
        Line::from(""),
        field("World seed", seed.world_seed.to_string()),
        field("Collapse", seed.cause_of_collapse.clone()),
        field("Adversary", seed.adversary.clone()),
        field("Former job", seed.former_job.clone()),
        Line::from(""),
        field("Food / Water", format!("{} / {}", r.food, r.water)),
        field("Scrap", r.scrap.to_string()),
        field("Medicine / Ammo", format!("{} / {}", r.medicine, r.ammunition)),
        field("Morality", seed.base_morality.to_string()),
        field("Survival", seed.base_survival.to_string()),
        field("Zombie density", format!("{:.2}", seed.initial_zombie_density)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": Start   "),
            Span::styled("R", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": Reroll   "),
            Span::styled("Q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": Quit"),
        ]),
    ];

    let block = Block::default()
        .title(" New World ")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Play screen: map, side panel, toolbar, status bar
fn draw_run(frame: &mut Frame, view: &RunView, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(view.height as u16 + 2), // Map + side panel
            Constraint::Length(3),                   // Toolbar
            Constraint::Length(1),                   // Status bar
        ])
        .split(frame.area());

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(view.width as u16 * 2 + 2),
            Constraint::Min(24),
        ])
        .split(main_chunks[0]);

    app.map_area = widgets::map::draw(frame, top_chunks[0], view);
    widgets::hud::draw(frame, top_chunks[1], view);
    widgets::toolbar::draw(frame, main_chunks[1], &view.build);
    draw_status_bar(frame, main_chunks[2], view);

    if let Some(dilemma) = &view.dilemma {
        draw_dilemma(frame, dilemma);
    }
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, area: Rect, view: &RunView) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut spans = if view.build.active {
        vec![
            Span::styled(" Arrows", bold),
            Span::raw(": Cursor | "),
            Span::styled("1-4", bold),
            Span::raw(": Pick | "),
            Span::styled("Enter", bold),
            Span::raw(": Place | "),
            Span::styled("X", bold),
            Span::raw(": Dismantle | "),
            Span::styled("R", bold),
            Span::raw(": Rotate | "),
            Span::styled("Esc", bold),
            Span::raw(": Done"),
        ]
    } else {
        vec![
            Span::styled(" WASD", bold),
            Span::raw(": Move | "),
            Span::styled("B", bold),
            Span::raw(": Build | "),
            Span::styled("T", bold),
            Span::raw(": Terminal | "),
            Span::styled("Ctrl-R", bold),
            Span::raw(": New run | "),
            Span::styled("Q", bold),
            Span::raw(": Quit | "),
            Span::styled("?", bold),
            Span::raw(": Help"),
        ]
    };

    if let Some(ghost) = &view.build.ghost {
        let (text, color) = if ghost.valid {
            ("  can build here", Color::Green)
        } else {
            ("  cannot build here", Color::Red)
        };
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Draw the modal moral-choice prompt
fn draw_dilemma(frame: &mut Frame, dilemma: &DilemmaView) {
    let area = centered(frame.area(), 58, 10);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::raw(dilemma.prompt.as_str())),
        Line::from(""),
    ];
    for (option, key) in dilemma.options.iter().zip(["Y", "N"]) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  [{}] ", key),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(option.label.as_str()),
            Span::styled(
                format!("  morality {:+}, survival {:+}", option.morality, option.survival),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let block = Block::default()
        .title(" Moral Choice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draw the help overlay
fn draw_help(frame: &mut Frame) {
    let popup_area = centered(frame.area(), 60, 24);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let section = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            "AFTER HUMANITY - Keybindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Seed Screen", section)),
        Line::from("  Enter       Start the run"),
        Line::from("  R           Reroll the world"),
        Line::from(""),
        Line::from(Span::styled("Exploring", section)),
        Line::from("  Arrows/WASD Move (walk onto * to scavenge)"),
        Line::from("  T           Open a moral choice"),
        Line::from("  Ctrl-R      Abandon run"),
        Line::from(""),
        Line::from(Span::styled("Building", section)),
        Line::from("  B           Toggle build mode"),
        Line::from("  1-4         Wall, Farm, Raincatcher, Turret"),
        Line::from("  Arrows      Move the cursor (or use the mouse)"),
        Line::from("  Enter/Space Place (left click)"),
        Line::from("  X           Dismantle for half the scrap back"),
        Line::from("  R           Rotate"),
        Line::from("  C           Clear selection (right click)"),
        Line::from("  Esc         Leave build mode"),
        Line::from(""),
        Line::from("  Q           Quit"),
        Line::from("  ?           Toggle this help"),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

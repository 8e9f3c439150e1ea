//! Resources and meters panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::ledger::METER_MAX;
use crate::observer::RunView;

/// Draw the stockpile and the two meters
pub fn draw(frame: &mut Frame, area: Rect, view: &RunView) {
    let block = Block::default().title(" Survivor ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Stockpile
            Constraint::Length(1), // Morality
            Constraint::Length(1), // Survival
            Constraint::Min(0),    // Seed summary
        ])
        .split(inner);

    let r = &view.resources;
    let label = Style::default().fg(Color::DarkGray);
    let stockpile = vec![
        resource_line("Food", r.food, Color::Green, label),
        resource_line("Water", r.water, Color::Blue, label),
        resource_line("Scrap", r.scrap, Color::Yellow, label),
        resource_line("Medicine", r.medicine, Color::Red, label),
        resource_line("Ammo", r.ammunition, Color::Gray, label),
    ];
    frame.render_widget(Paragraph::new(stockpile), chunks[0]);

    frame.render_widget(meter("Morality", view.morality, Color::Cyan), chunks[1]);
    frame.render_widget(meter("Survival", view.survival, Color::LightRed), chunks[2]);

    let seed = &view.seed;
    let summary = vec![
        Line::from(""),
        Line::from(Span::styled(format!("Seed {}", seed.world_seed), label)),
        Line::from(Span::styled(seed.cause_of_collapse.as_str(), label)),
        Line::from(Span::styled(format!("vs {}", seed.adversary), label)),
        Line::from(Span::styled(format!("ex-{}", seed.former_job), label)),
    ];
    frame.render_widget(Paragraph::new(summary), chunks[3]);
}

fn resource_line(name: &str, amount: u32, color: Color, label: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", name), label),
        Span::styled(
            amount.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn meter(name: &str, value: u32, color: Color) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(color))
        .label(format!("{} {}", name, value))
        .ratio(f64::from(value.min(METER_MAX)) / f64::from(METER_MAX))
}

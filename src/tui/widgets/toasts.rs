//! Toast notifications.

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::observer::EventViewType;
use crate::tui::app::Toast;

/// Draw toasts stacked in the top-right corner of `area`
pub fn draw(frame: &mut Frame, area: Rect, toasts: &VecDeque<Toast>) {
    if toasts.is_empty() {
        return;
    }

    let width = 40.min(area.width);
    let height = (toasts.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, height);

    let lines: Vec<Line> = toasts
        .iter()
        .rev()
        .map(|toast| {
            let (icon, style) = icon_for(toast.view.event_type);
            Line::from(vec![
                Span::styled(icon, style),
                Span::raw(" "),
                Span::styled(toast.view.description.as_str(), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

fn icon_for(kind: EventViewType) -> (&'static str, Style) {
    match kind {
        EventViewType::Run => ("★", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        EventViewType::Scavenge => ("◆", Style::default().fg(Color::Yellow)),
        EventViewType::Terminal => ("▣", Style::default().fg(Color::Cyan)),
        EventViewType::Construction => ("⚒", Style::default().fg(Color::LightBlue)),
        EventViewType::Harvest => ("♠", Style::default().fg(Color::Green)),
        EventViewType::Dilemma => ("!", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
    }
}

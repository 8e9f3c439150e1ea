//! Build palette shown along the bottom of the play screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::observer::BuildView;

pub fn draw(frame: &mut Frame, area: Rect, build: &BuildView) {
    let title = if build.active {
        format!(" Build - rotation {}° ", build.rotation_degrees)
    } else {
        " Build (B) ".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let mut spans = Vec::new();
    for entry in &build.palette {
        let mut style = if entry.affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if build.active && entry.selected {
            style = style.bg(Color::Rgb(40, 40, 70)).add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(
            format!(" [{}] {} ({}) ", entry.hotkey, entry.name, entry.cost),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

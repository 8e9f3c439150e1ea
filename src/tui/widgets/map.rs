//! Map widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::observer::{CellView, GhostView, RunView};
use crate::structures::BuildingKind;
use crate::world::Tile;

/// Draw the map and return the inner area it occupies
pub fn draw(frame: &mut Frame, area: Rect, view: &RunView) -> Rect {
    let title = if view.build.active {
        format!(" Day {} - Build Mode ", view.day)
    } else {
        format!(" Day {} ", view.day)
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ghost = view.build.ghost.as_ref();

    // Build map lines
    let mut lines = Vec::with_capacity(view.height);
    for y in 0..view.height as i32 {
        let mut spans = Vec::with_capacity(view.width);
        for x in 0..view.width as i32 {
            let (ch, style) = match view.get(x, y) {
                Some(cell) => {
                    let ghost_here = ghost.filter(|g| g.position.x == x && g.position.y == y);
                    cell_glyph(cell, ghost_here)
                }
                None => (' ', Style::default()),
            };
            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);

    Rect {
        width: inner.width.min(view.width as u16 * 2),
        height: inner.height.min(view.height as u16),
        ..inner
    }
}

fn cell_glyph(cell: &CellView, ghost: Option<&GhostView>) -> (char, Style) {
    let (ch, mut style) = if cell.player {
        (
            '@',
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if let Some(building) = &cell.building {
        (building.kind.glyph(), building_style(building.kind))
    } else {
        tile_glyph(cell.tile)
    };

    // Ghost preview tints the cell
    if let Some(ghost) = ghost {
        let bg = if ghost.valid {
            Color::Rgb(30, 70, 30)
        } else {
            Color::Rgb(80, 30, 30)
        };
        if !cell.player && cell.building.is_none() {
            if let Some(kind) = ghost.kind {
                return (kind.glyph(), Style::default().fg(Color::White).bg(bg));
            }
        }
        style = style.bg(bg);
    }

    (ch, style)
}

fn tile_glyph(tile: Tile) -> (char, Style) {
    let style = match tile {
        Tile::Floor => Style::default().fg(Color::Rgb(60, 60, 60)),
        Tile::Wall => Style::default().fg(Color::Gray),
        Tile::Resource => Style::default().fg(Color::Yellow),
        Tile::Terminal => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    };
    (tile.glyph(), style)
}

fn building_style(kind: BuildingKind) -> Style {
    let color = match kind {
        BuildingKind::Wall => Color::White,
        BuildingKind::Farm => Color::Green,
        BuildingKind::Raincatcher => Color::Blue,
        BuildingKind::Turret => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

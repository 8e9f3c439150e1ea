//! Application state for the TUI.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::observation::Event;
use crate::observer::EventView;
use crate::world::Position;

/// How long a toast stays on screen
const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Most toasts shown at once
const MAX_TOASTS: usize = 4;

/// A transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub view: EventView,
    pub shown_at: Instant,
}

/// TUI application state
pub struct App {
    /// Show help overlay
    pub show_help: bool,

    /// Notifications, oldest first
    pub toasts: VecDeque<Toast>,

    /// Where the map was last drawn, for mouse hit-testing
    pub map_area: Rect,
}

impl App {
    pub fn new() -> Self {
        Self {
            show_help: false,
            toasts: VecDeque::new(),
            map_area: Rect::default(),
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Queue toasts for events worth surfacing
    pub fn push_events(&mut self, events: &[Event]) {
        let now = Instant::now();
        for view in EventView::from_events(events) {
            self.toasts.push_back(Toast { view, shown_at: now });
        }
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts that have been up long enough
    pub fn expire_toasts(&mut self) {
        self.toasts
            .retain(|t| t.shown_at.elapsed() < TOAST_LIFETIME);
    }

    /// Map a terminal cell to a grid cell. Each map cell is two columns wide.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.map_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let x = (column - area.x) / 2;
        let y = row - area.y;
        Some(Position::new(x as i32, y as i32))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Option<Rect>,
    /// Tab bar area, only inside the main app.
    pub tab_area: Option<Rect>,
    /// Main content area.
    pub main_area: Rect,
    /// Key hint line (bottom).
    pub hint_area: Option<Rect>,
    /// Toast area (overlaid, top right).
    pub toast_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, status_bar: bool, tab_bar: bool, hint_bar: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::from(status_bar)), // Status bar
                Constraint::Length(u16::from(tab_bar)),    // Tab bar
                Constraint::Min(0),                        // Main content
                Constraint::Length(u16::from(hint_bar)),   // Key hints
            ])
            .split(area);

        let toast_width = (area.width / 2).max(30).min(area.width);
        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(toast_width),
            y: chunks[2].y,
            width: toast_width,
            height: 4.min(chunks[2].height),
        };

        Self {
            status_area: status_bar.then_some(chunks[0]),
            tab_area: tab_bar.then_some(chunks[1]),
            main_area: chunks[2],
            hint_area: hint_bar.then_some(chunks[3]),
            toast_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

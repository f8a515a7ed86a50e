//! Toast rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{Toast, ToastLevel};
use crate::ui::Theme;

/// Render a toast popup.
pub fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, theme: &Theme) {
    frame.render_widget(Clear, area);

    let (border_color, icon) = match toast.level {
        ToastLevel::Info => (theme.accent, "ℹ"),
        ToastLevel::Success => (theme.positive, "✓"),
        ToastLevel::Warning => (theme.neutral, "⚠"),
        ToastLevel::Error => (theme.error, "✗"),
    };

    let mut lines = Vec::with_capacity(2);
    if let Some(title) = &toast.title {
        lines.push(Line::from(Span::styled(
            title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(border_color)),
        Span::raw(toast.message.as_str()),
    ]));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .style(Style::default().fg(theme.foreground));

    frame.render_widget(paragraph, area);
}

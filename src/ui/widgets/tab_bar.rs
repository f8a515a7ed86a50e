//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::navigation::Tab;
use crate::state::Store;
use crate::ui::Theme;

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let mut spans = vec![Span::raw(" ")];

        for (i, tab) in Tab::ALL.into_iter().enumerate() {
            let focused = store.nav.tab() == tab;

            let key_style = Style::default().fg(theme.inactive);
            let name_style = if focused {
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.inactive)
            };

            spans.push(Span::styled(format!("[{}] ", i + 1), key_style));
            spans.push(Span::styled(
                format!("{} {}", tab.icon(focused), tab.title()),
                name_style,
            ));
            spans.push(Span::raw("  "));
        }

        let tab_line = Line::from(spans);
        let paragraph = Paragraph::new(tab_line);

        frame.render_widget(paragraph, area);
    }
}

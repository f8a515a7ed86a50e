//! Profile screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::screen_block;
use crate::state::Store;
use crate::ui::Theme;

/// Profile widget.
pub struct ProfilePanel;

impl ProfilePanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let profile = &store.app.profile;
        let switch = |on: bool| {
            if on {
                Span::styled("[on] ", Style::default().fg(theme.positive))
            } else {
                Span::styled("[off]", Style::default().fg(theme.inactive))
            }
        };

        let lines = vec![
            Line::from(Span::styled("Account", theme.heading())),
            Line::from(format!(
                "  Email          {}",
                profile.email.as_deref().unwrap_or("-")
            )),
            Line::from(""),
            Line::from(Span::styled("Preferences", theme.heading())),
            Line::from(vec![
                Span::raw("  Push notifications  "),
                switch(profile.notifications_enabled),
            ]),
            Line::from(vec![Span::raw("  Dark mode           "), switch(profile.dark_mode)]),
            Line::from(Span::styled(
                format!(
                    "  Push token          {}",
                    profile.push_token.as_deref().unwrap_or("not registered")
                ),
                Style::default().fg(theme.inactive),
            )),
            Line::from(""),
            Line::from(Span::styled("Session", theme.heading())),
            Line::from("  Refresh the session token or log out from here."),
        ];

        let paragraph = Paragraph::new(lines).block(screen_block(" Profile ".to_string(), theme));
        frame.render_widget(paragraph, area);
    }
}

//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;
use crate::ui::Theme;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, kb: &KeyBindings, theme: &Theme) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let sections: [(&str, Vec<(&str, &str)>); 4] = [
            (
                "Navigation",
                vec![
                    (kb.down.as_str(), "Move down"),
                    (kb.up.as_str(), "Move up"),
                    (kb.select.as_str(), "Select/confirm"),
                    (kb.back.as_str(), "Back"),
                    (kb.next_tab.as_str(), "Next tab"),
                    (kb.prev_tab.as_str(), "Previous tab"),
                ],
            ),
            (
                "Tabs",
                vec![
                    (kb.home.as_str(), "Home"),
                    (kb.signals.as_str(), "Signals"),
                    (kb.market.as_str(), "Market"),
                    (kb.performance.as_str(), "Performance"),
                    (kb.copy_trade.as_str(), "Copy trade"),
                    (kb.profile.as_str(), "Profile"),
                ],
            ),
            (
                "Screens",
                vec![
                    (kb.filter.as_str(), "Cycle market filter"),
                    (kb.test_notification.as_str(), "Send test notification"),
                    (kb.follow.as_str(), "Follow/unfollow trader"),
                    (kb.refresh_session.as_str(), "Refresh session"),
                    (kb.toggle_notifications.as_str(), "Toggle push notifications"),
                    (kb.toggle_dark_mode.as_str(), "Toggle dark mode"),
                    (kb.logout.as_str(), "Log out"),
                ],
            ),
            (
                "Actions",
                vec![
                    (kb.refresh.as_str(), "Refresh data"),
                    (kb.help.as_str(), "Toggle help"),
                    (kb.quit.as_str(), "Quit"),
                ],
            ),
        ];

        let mut help_text = Vec::new();
        for (heading, bindings) in sections {
            if !help_text.is_empty() {
                help_text.push(Line::from(""));
            }
            help_text.push(Line::from(vec![Span::styled(
                heading,
                Style::default()
                    .fg(theme.neutral)
                    .add_modifier(Modifier::BOLD),
            )]));
            help_text.push(Line::from(""));
            for (key, description) in bindings {
                help_text.push(Line::from(vec![
                    Span::styled(format!("  {key:<8}"), Style::default().fg(theme.accent)),
                    Span::raw(description),
                ]));
            }
        }

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.neutral)),
            )
            .style(Style::default().fg(theme.foreground));

        frame.render_widget(help, popup_area);
    }
}

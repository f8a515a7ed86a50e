//! TUI widgets.

mod help;
mod home_panel;
mod login_form;
mod market_list;
mod profile_panel;
mod signal_list;
mod status_bar;
mod strategy_list;
mod tab_bar;
mod toast;
mod trader_list;

pub use help::HelpPanel;
pub use home_panel::HomePanel;
pub use login_form::LoginForm;
pub use market_list::MarketList;
pub use profile_panel::ProfilePanel;
pub use signal_list::SignalList;
pub use status_bar::{StatusBar, render_hints};
pub use strategy_list::StrategyList;
pub use tab_bar::TabBar;
pub use toast::render_toast;
pub use trader_list::TraderList;

use super::Theme;
use crate::state::Collection;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Bordered block with the screen title.
fn screen_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(theme.heading())
        .borders(Borders::ALL)
        .border_style(theme.border())
}

/// Title suffix describing a collection's fetch state.
fn fetch_badge<T>(list: &Collection<T>) -> &'static str {
    if list.loading {
        " · loading"
    } else if list.refreshing {
        " · refreshing"
    } else {
        ""
    }
}

/// Centered placeholder for an empty list.
fn render_empty<T>(frame: &mut Frame, area: Rect, list: &Collection<T>, what: &str, theme: &Theme) {
    let text = if list.loading {
        "Loading...".to_string()
    } else {
        format!("No {what} available")
    };
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let y = inner.y + inner.height / 2;
    let line = Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.inactive)
            .add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        Rect {
            y,
            height: 1.min(inner.height),
            ..inner
        },
    );
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_string("Momentum", 20), "Momentum");
        assert_eq!(truncate_string("Breakout Trading", 8), "Break...");
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }
}

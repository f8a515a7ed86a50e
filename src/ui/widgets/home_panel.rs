//! Home screen: welcome text and shortcut cards.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::navigation::Tab;
use crate::state::{HOME_SHORTCUTS, Store};
use crate::ui::Theme;

/// Home screen widget.
pub struct HomePanel;

impl HomePanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let block = super::screen_block(" Home ".to_string(), theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(6), Constraint::Min(0)])
            .split(inner);

        let greeting = match &store.app.profile.email {
            Some(email) => format!("Welcome back, {email}"),
            None => "Welcome to SpreadEdge".to_string(),
        };
        let intro = Paragraph::new(vec![
            Line::from(Span::styled(greeting, theme.heading())),
            Line::from("Live market analysis, trading signals and copy trading."),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, rows[0]);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                HOME_SHORTCUTS
                    .iter()
                    .map(|_| Constraint::Ratio(1, HOME_SHORTCUTS.len() as u32)),
            )
            .split(rows[1]);

        for (i, tab) in HOME_SHORTCUTS.into_iter().enumerate() {
            let selected = store.app.home_shortcut == i;
            let border = if selected {
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme.border()
            };
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} {}", tab.icon(selected), tab.title()),
                    theme.heading(),
                )),
                Line::from(Self::blurb(tab)),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border),
            );
            frame.render_widget(card, cards[i]);
        }
    }

    fn blurb(tab: Tab) -> &'static str {
        match tab {
            Tab::Market => "Prices and trends across crypto, forex and stocks",
            Tab::Signals => "Buy and sell calls with confidence scores",
            Tab::CopyTrade => "Follow top traders",
            _ => "",
        }
    }
}

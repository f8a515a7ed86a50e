//! Copy-trade widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use super::{fetch_badge, render_empty, screen_block};
use crate::state::Store;
use crate::ui::Theme;

/// Traders available for copy trading.
pub struct TraderList;

impl TraderList {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let list = &store.copy_trade.list;
        let block = screen_block(
            format!(
                " CopyTrade ({} following){} ",
                store.copy_trade.following_count(),
                fetch_badge(list)
            ),
            theme,
        );

        if list.items.is_empty() {
            frame.render_widget(block, area);
            render_empty(frame, area, list, "traders", theme);
            return;
        }

        let header_cells = ["Trader", "Performance", "Trades", "Win rate", ""]
            .iter()
            .map(|h| Cell::from(*h).style(theme.heading()));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = list.items.iter().map(|trader| {
            let up = trader.performance.is_sign_positive();
            let follow = if trader.is_following {
                Cell::from("Following").style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Cell::from("Follow").style(Style::default().fg(theme.inactive))
            };

            Row::new(vec![
                Cell::from(trader.name.clone()),
                Cell::from(format!("{:+.1}%", trader.performance))
                    .style(Style::default().fg(theme.trend(up))),
                Cell::from(trader.trades.to_string()),
                Cell::from(format!("{:.1}%", trader.win_rate * 100.0)),
                follow,
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(13),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight())
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(list.selected_index);
        frame.render_stateful_widget(table, area, &mut state);
    }
}

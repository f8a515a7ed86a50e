//! Strategy performance widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
};

use super::{fetch_badge, render_empty, screen_block, truncate_string};
use crate::state::{Store, Strategy};
use crate::ui::Theme;

/// Strategy list, or the detail view of one strategy.
pub struct StrategyList;

impl StrategyList {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        if let Some(strategy) = store.performance.detail_strategy() {
            Self::render_detail(frame, area, strategy, theme);
            return;
        }

        let list = &store.performance.list;
        let block = screen_block(
            format!(" Performance ({}){} ", list.items.len(), fetch_badge(list)),
            theme,
        );

        if list.items.is_empty() {
            frame.render_widget(block, area);
            render_empty(frame, area, list, "strategies", theme);
            return;
        }

        let header_cells = ["Strategy", "Return", "Win rate", "Trades", "Sharpe"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.heading()));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = list.items.iter().map(|strategy| {
            let metrics = &strategy.performance;
            Row::new(vec![
                Cell::from(truncate_string(&strategy.name, 24)),
                Cell::from(format!("{:+.1}%", metrics.total_return))
                    .style(Style::default().fg(theme.trend(metrics.total_return >= 0.0))),
                Cell::from(format!("{:.1}%", metrics.win_rate)),
                Cell::from(metrics.trades.to_string()),
                Cell::from(format!("{:.2}", metrics.sharpe_ratio)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(8),
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

    fn render_detail(frame: &mut Frame, area: Rect, strategy: &Strategy, theme: &Theme) {
        let metrics = &strategy.performance;
        let label = |text: &'static str| Span::styled(format!("{text:<14}"), theme.heading());

        let lines = vec![
            Line::from(strategy.description.as_str()),
            Line::from(""),
            Line::from(vec![
                label("Total return"),
                Span::styled(
                    format!("{:+.1}%", metrics.total_return),
                    Style::default().fg(theme.trend(metrics.total_return >= 0.0)),
                ),
            ]),
            Line::from(vec![label("Win rate"), Span::raw(format!("{:.1}%", metrics.win_rate))]),
            Line::from(vec![label("Trades"), Span::raw(metrics.trades.to_string())]),
            Line::from(vec![
                label("Sharpe ratio"),
                Span::raw(format!("{:.2}", metrics.sharpe_ratio)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Last updated {}",
                    strategy
                        .last_updated
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                ),
                Style::default().fg(theme.inactive),
            )),
        ];

        let detail = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(screen_block(format!(" Performance · {} ", strategy.name), theme));
        frame.render_widget(detail, area);
    }
}

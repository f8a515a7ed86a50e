//! Market list widget.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table, TableState},
};

use super::{fetch_badge, render_empty, screen_block, truncate_string};
use crate::state::{AssetFilter, MarketItem, Store};
use crate::ui::Theme;

/// Market list widget.
pub struct MarketList;

impl MarketList {
    /// Render the market list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let markets = store.markets.filtered_items();

        let block = screen_block(
            format!(
                " Market ({}){} ",
                markets.len(),
                fetch_badge(&store.markets.list)
            ),
            theme,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Filter segments
                Constraint::Min(3),    // Table
                Constraint::Length(6), // Chart
            ])
            .split(inner);

        Self::render_filters(frame, chunks[0], store.markets.filter, theme);

        if markets.is_empty() {
            render_empty(frame, chunks[1], &store.markets.list, "market data", theme);
            return;
        }

        let header_cells = ["Symbol", "Class", "Price", "Change", "Volume"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.heading()));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = markets.iter().map(|item| {
            let trend = Style::default().fg(theme.trend(item.is_up()));
            let arrow = if item.is_up() { "▲" } else { "▼" };

            let cells = vec![
                Cell::from(truncate_string(&item.symbol, 14)),
                Cell::from(item.asset_class.to_string()),
                Cell::from(format!("${:.2}", item.price)),
                Cell::from(format!("{arrow} {:.2}%", item.change.abs())).style(trend),
                Cell::from(format_volume(item)),
            ];

            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(16),
                Constraint::Length(8),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .row_highlight_style(theme.highlight())
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(store.markets.list.selected_index);

        frame.render_stateful_widget(table, chunks[1], &mut state);

        if let Some(item) = store.markets.selected_item() {
            Self::render_chart(frame, chunks[2], item, theme);
        }
    }

    fn render_filters(frame: &mut Frame, area: Rect, active: AssetFilter, theme: &Theme) {
        let mut spans = vec![Span::raw(" ")];
        for filter in AssetFilter::ALL {
            let style = if filter == active {
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(theme.inactive)
            };
            spans.push(Span::styled(format!(" {} ", filter.label()), style));
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_chart(frame: &mut Frame, area: Rect, item: &MarketItem, theme: &Theme) {
        let block = Block::default()
            .title(format!(" {} ", item.symbol))
            .borders(Borders::TOP)
            .border_style(theme.border());

        if item.chart.is_empty() {
            frame.render_widget(
                Paragraph::new("No chart data").block(block),
                area,
            );
            return;
        }

        // Sparkline takes u64; shift the series so its minimum sits at zero.
        let min = item.chart.iter().copied().fold(f64::INFINITY, f64::min);
        let data: Vec<u64> = item
            .chart
            .iter()
            .map(|v| ((v - min) * 1000.0).round().max(0.0) as u64 + 1)
            .collect();

        let sparkline = Sparkline::default()
            .block(block)
            .data(&data)
            .style(Style::default().fg(theme.trend(item.is_up())));
        frame.render_widget(sparkline, area);
    }
}

fn format_volume(item: &MarketItem) -> String {
    use rust_decimal::prelude::ToPrimitive;

    let volume = item.volume.to_f64().unwrap_or_default();
    if volume >= 1e9 {
        format!("{:.1}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.1}K", volume / 1e3)
    } else {
        format!("{volume:.0}")
    }
}

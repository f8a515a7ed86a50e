//! Signal feed widget.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table, TableState},
};

use super::{fetch_badge, render_empty, screen_block};
use crate::state::{SignalType, Store};
use crate::ui::Theme;

/// Signal feed widget.
pub struct SignalList;

impl SignalList {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let signals = &store.signals;
        let block = screen_block(
            format!(
                " Signals ({}){} ",
                signals.items.len(),
                fetch_badge(signals)
            ),
            theme,
        );

        if signals.items.is_empty() {
            frame.render_widget(block, area);
            render_empty(frame, area, signals, "signals", theme);
            return;
        }

        let header_cells = ["Symbol", "Signal", "Price", "Confidence", "Time"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.heading()));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = signals.items.iter().map(|signal| {
            let color = match signal.signal_type {
                SignalType::Buy => theme.positive,
                SignalType::Sell => theme.negative,
                SignalType::Neutral => theme.neutral,
            };
            let time = signal
                .timestamp
                .map(|ts| {
                    ts.with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                })
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(signal.symbol.clone()),
                Cell::from(signal.signal_type.to_string()).style(Style::default().fg(color)),
                Cell::from(format!("${:.2}", signal.price)),
                Cell::from(confidence_bar(signal.confidence_percent())),
                Cell::from(time),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(14),
                Constraint::Length(18),
                Constraint::Min(16),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme.highlight())
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(signals.selected_index);
        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Ten-cell bar followed by the percentage.
fn confidence_bar(percent: f64) -> String {
    let filled = (percent / 10.0).round() as usize;
    format!(
        "{}{} {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(10 - filled.min(10)),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bar() {
        assert_eq!(confidence_bar(85.0), "█████████░  85%");
        assert_eq!(confidence_bar(0.0), "░░░░░░░░░░   0%");
    }
}

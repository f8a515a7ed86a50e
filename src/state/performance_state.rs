//! Strategy performance state.

use super::Collection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Performance metrics of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    /// Total return in percent.
    pub total_return: f64,
    /// Win rate in percent.
    pub win_rate: f64,
    /// Number of trades.
    pub trades: u32,
    pub sharpe_ratio: f64,
}

/// A trading strategy and how it has performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub performance: StrategyMetrics,
    pub last_updated: DateTime<Utc>,
}

/// State of the performance screen.
#[derive(Debug, Default)]
pub struct PerformanceState {
    /// Fetched strategies.
    pub list: Collection<Strategy>,
    /// Strategy shown in the detail view.
    pub detail: Option<String>,
}

impl PerformanceState {
    /// Show the selected strategy in detail.
    pub fn open_selected(&mut self) {
        self.detail = self.list.selected().map(|s| s.id.clone());
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// The strategy in the detail view, if it is still listed.
    pub fn detail_strategy(&self) -> Option<&Strategy> {
        let id = self.detail.as_deref()?;
        self.list.items.iter().find(|s| s.id == id)
    }
}

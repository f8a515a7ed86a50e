//! Copy-trading state.

use super::Collection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A trader that can be followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trader {
    pub id: String,
    pub name: String,
    /// Performance in percent.
    pub performance: Decimal,
    /// Number of trades.
    pub trades: u32,
    /// Win rate between 0 and 1.
    pub win_rate: f64,
    #[serde(default)]
    pub is_following: bool,
}

/// State of the copy-trade screen.
#[derive(Debug, Default)]
pub struct CopyTradeState {
    /// Fetched traders.
    pub list: Collection<Trader>,
}

impl CopyTradeState {
    /// Flip the follow flag of a trader. Returns the new value, or `None` if
    /// the trader is not listed.
    pub fn toggle_follow(&mut self, trader_id: &str) -> Option<bool> {
        let trader = self.list.items.iter_mut().find(|t| t.id == trader_id)?;
        trader.is_following = !trader.is_following;
        Some(trader.is_following)
    }

    /// Set the follow flag of a trader. Returns false if the trader is not
    /// listed.
    pub fn set_follow(&mut self, trader_id: &str, following: bool) -> bool {
        match self.list.items.iter_mut().find(|t| t.id == trader_id) {
            Some(trader) => {
                trader.is_following = following;
                true
            }
            None => false,
        }
    }

    /// Number of followed traders.
    pub fn following_count(&self) -> usize {
        self.list.items.iter().filter(|t| t.is_following).count()
    }
}

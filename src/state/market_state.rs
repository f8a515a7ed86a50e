//! Market overview state.

use super::Collection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset class of a market item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Crypto,
    Forex,
    Stocks,
}

impl AssetClass {
    /// Classify by symbol shape: `EUR/USD` is forex, `BTC-USD` is crypto,
    /// anything else is a stock or index.
    pub fn from_symbol(symbol: &str) -> Self {
        if symbol.contains('/') {
            Self::Forex
        } else if symbol.contains('-') {
            Self::Crypto
        } else {
            Self::Stocks
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crypto => write!(f, "Crypto"),
            Self::Forex => write!(f, "Forex"),
            Self::Stocks => write!(f, "Stocks"),
        }
    }
}

/// One instrument on the market screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    /// Symbol or pair (`BTC-USD`, `EUR/USD`, `AAPL`).
    pub symbol: String,
    /// Last price.
    pub price: Decimal,
    /// Percent change.
    pub change: Decimal,
    /// Traded volume.
    pub volume: Decimal,
    /// Short price history, oldest first.
    pub chart: Vec<f64>,
    /// Asset class.
    pub asset_class: AssetClass,
}

impl MarketItem {
    pub fn is_up(&self) -> bool {
        self.change >= Decimal::ZERO
    }
}

/// Segmented asset filter of the market screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetFilter {
    #[default]
    All,
    Forex,
    Stocks,
    Crypto,
}

impl AssetFilter {
    /// Filters in segment order.
    pub const ALL: [AssetFilter; 4] = [
        AssetFilter::All,
        AssetFilter::Forex,
        AssetFilter::Stocks,
        AssetFilter::Crypto,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Forex => "Forex",
            Self::Stocks => "Stocks",
            Self::Crypto => "Crypto",
        }
    }

    /// The next segment, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Whether an item passes this filter.
    pub fn matches(self, item: &MarketItem) -> bool {
        match self {
            Self::All => true,
            Self::Forex => item.asset_class == AssetClass::Forex,
            Self::Stocks => item.asset_class == AssetClass::Stocks,
            Self::Crypto => item.asset_class == AssetClass::Crypto,
        }
    }
}

/// State of the market screen.
#[derive(Debug, Default)]
pub struct MarketState {
    /// Fetched items.
    pub list: Collection<MarketItem>,
    /// Active asset filter.
    pub filter: AssetFilter,
}

impl MarketState {
    /// Items passing the active filter, in fetch order.
    pub fn filtered_items(&self) -> Vec<&MarketItem> {
        self.list
            .items
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect()
    }

    /// The selected item among the filtered ones.
    pub fn selected_item(&self) -> Option<&MarketItem> {
        self.list
            .selected_index
            .and_then(|i| self.filtered_items().get(i).copied())
    }

    /// Switch filter and reset the selection to the first visible row.
    pub fn set_filter(&mut self, filter: AssetFilter) {
        self.filter = filter;
        self.list.selected_index = if self.filtered_items().is_empty() {
            None
        } else {
            Some(0)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn item(symbol: &str) -> MarketItem {
        MarketItem {
            symbol: symbol.to_string(),
            price: dec!(100),
            change: dec!(-1.5),
            volume: dec!(1000),
            chart: vec![],
            asset_class: AssetClass::from_symbol(symbol),
        }
    }

    fn loaded_state() -> MarketState {
        let mut state = MarketState::default();
        let ticket = state.list.mount();
        state.list.settle(
            ticket,
            Ok(vec![item("BTC-USD"), item("EUR/USD"), item("AAPL")]),
        );
        state
    }

    fn symbols(state: &MarketState) -> Vec<&str> {
        state
            .filtered_items()
            .iter()
            .map(|i| i.symbol.as_str())
            .collect()
    }

    #[test]
    fn test_forex_filter_keeps_only_pairs() {
        let mut state = loaded_state();
        state.set_filter(AssetFilter::Forex);
        assert_eq!(symbols(&state), vec!["EUR/USD"]);
    }

    #[test]
    fn test_all_filter_preserves_order() {
        let state = loaded_state();
        assert_eq!(symbols(&state), vec!["BTC-USD", "EUR/USD", "AAPL"]);
    }

    #[test]
    fn test_crypto_and_stocks_filters() {
        let mut state = loaded_state();
        state.set_filter(AssetFilter::Crypto);
        assert_eq!(symbols(&state), vec!["BTC-USD"]);
        state.set_filter(AssetFilter::Stocks);
        assert_eq!(symbols(&state), vec!["AAPL"]);
        assert_eq!(state.selected_item().map(|i| i.symbol.as_str()), Some("AAPL"));
    }

    #[test]
    fn test_filter_cycle_order() {
        assert_eq!(AssetFilter::All.next(), AssetFilter::Forex);
        assert_eq!(AssetFilter::Crypto.next(), AssetFilter::All);
    }

    #[test]
    fn test_negative_change_is_down() {
        assert!(!item("AAPL").is_up());
    }
}

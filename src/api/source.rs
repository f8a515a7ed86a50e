//! Where screens get their data from.

use super::ApiClient;
use crate::error::Result;
use crate::state::{
    AssetClass, MarketItem, Signal, SignalType, Strategy, StrategyMetrics, Trader,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

/// Data behind the Signals, Market, Performance and CopyTrade screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn market_analysis(&self) -> Result<Vec<MarketItem>>;

    async fn signals(&self) -> Result<Vec<Signal>>;

    async fn traders(&self) -> Result<Vec<Trader>>;

    /// Flip the follow state of a trader on the backend.
    async fn toggle_follow(&self, trader_id: &str) -> Result<()>;

    async fn strategies(&self) -> Result<Vec<Strategy>>;
}

/// Backend-backed source.
#[derive(Debug, Clone)]
pub struct LiveDataSource {
    client: ApiClient,
    strategies_endpoint: Option<String>,
}

impl LiveDataSource {
    /// Strategies are fetched from `strategies_endpoint` when set, otherwise
    /// the placeholder catalog is served.
    pub fn new(client: ApiClient, strategies_endpoint: Option<String>) -> Self {
        Self {
            client,
            strategies_endpoint,
        }
    }
}

#[async_trait]
impl DataSource for LiveDataSource {
    async fn market_analysis(&self) -> Result<Vec<MarketItem>> {
        self.client.fetch_market_analysis().await
    }

    async fn signals(&self) -> Result<Vec<Signal>> {
        self.client.fetch_signals().await
    }

    async fn traders(&self) -> Result<Vec<Trader>> {
        self.client.fetch_traders().await
    }

    async fn toggle_follow(&self, trader_id: &str) -> Result<()> {
        self.client.toggle_follow(trader_id).await
    }

    async fn strategies(&self) -> Result<Vec<Strategy>> {
        match &self.strategies_endpoint {
            Some(path) => self.client.fetch_strategies(path).await,
            None => {
                debug!("No strategies endpoint configured, serving placeholder catalog");
                Ok(placeholder_strategies())
            }
        }
    }
}

/// Offline source with fixed sample data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderDataSource;

#[async_trait]
impl DataSource for PlaceholderDataSource {
    async fn market_analysis(&self) -> Result<Vec<MarketItem>> {
        Ok(vec![
            market_item("BTC-USD", 64250.12, 2.41, 31_200_000_000, AssetClass::Crypto),
            market_item("ETH-USD", 3120.55, -1.12, 14_800_000_000, AssetClass::Crypto),
            market_item("EUR/USD", 1.0842, 0.08, 98_000_000, AssetClass::Forex),
            market_item("GBP/USD", 1.2611, -0.21, 61_000_000, AssetClass::Forex),
            market_item("AAPL", 189.84, 0.94, 52_300_000, AssetClass::Stocks),
            market_item("^GSPC", 5123.41, 0.37, 3_900_000_000, AssetClass::Stocks),
        ])
    }

    async fn signals(&self) -> Result<Vec<Signal>> {
        let now = Utc::now();
        Ok(vec![
            signal("BTC", SignalType::Buy, 64250.12, 0.85, now),
            signal("EUR/USD", SignalType::Sell, 1.0842, 0.72, now),
            signal("AAPL", SignalType::Neutral, 189.84, 0.55, now),
        ])
    }

    async fn traders(&self) -> Result<Vec<Trader>> {
        Ok(vec![
            trader("1", "CryptoMaster", 24.3, 312, 0.74),
            trader("2", "ForexPro", 18.1, 205, 0.68),
            trader("3", "StockGuru", 14.6, 142, 0.81),
            trader("4", "DayTrader", 11.9, 640, 0.62),
            trader("5", "SwingKing", 29.4, 87, 0.88),
        ])
    }

    async fn toggle_follow(&self, trader_id: &str) -> Result<()> {
        debug!(trader_id, "Placeholder follow toggle");
        Ok(())
    }

    async fn strategies(&self) -> Result<Vec<Strategy>> {
        Ok(placeholder_strategies())
    }
}

/// Built-in strategy catalog.
pub fn placeholder_strategies() -> Vec<Strategy> {
    let now = Utc::now();
    let strategy = |id: &str, name: &str, description: &str, metrics: (f64, f64, u32, f64)| {
        Strategy {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            performance: StrategyMetrics {
                total_return: metrics.0,
                win_rate: metrics.1,
                trades: metrics.2,
                sharpe_ratio: metrics.3,
            },
            last_updated: now,
        }
    };

    vec![
        strategy(
            "1",
            "Momentum Trading",
            "Capitalizes on market momentum with quick entries and exits",
            (15.2, 68.5, 124, 1.8),
        ),
        strategy(
            "2",
            "Mean Reversion",
            "Trades based on price returning to historical averages",
            (12.8, 62.3, 98, 1.5),
        ),
        strategy(
            "3",
            "Breakout Trading",
            "Identifies and trades breakouts from key price levels",
            (18.5, 71.2, 156, 2.1),
        ),
    ]
}

fn decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or_default()
}

fn market_item(
    symbol: &str,
    price: f64,
    change: f64,
    volume: i64,
    asset_class: AssetClass,
) -> MarketItem {
    // Gentle drift toward the current price.
    let chart = (0..12)
        .map(|i| price * (1.0 - change / 100.0 * (11 - i) as f64 / 11.0))
        .collect();
    MarketItem {
        symbol: symbol.to_string(),
        price: decimal(price),
        change: decimal(change),
        volume: Decimal::from(volume),
        chart,
        asset_class,
    }
}

fn signal(
    symbol: &str,
    signal_type: SignalType,
    price: f64,
    confidence: f64,
    at: chrono::DateTime<Utc>,
) -> Signal {
    Signal {
        id: format!("{}_{}", symbol, at.to_rfc3339()),
        symbol: symbol.to_string(),
        signal_type,
        price: decimal(price),
        confidence,
        timestamp: Some(at),
    }
}

fn trader(id: &str, name: &str, performance: f64, trades: u32, win_rate: f64) -> Trader {
    Trader {
        id: id.to_string(),
        name: name.to_string(),
        performance: decimal(performance),
        trades,
        win_rate,
        is_following: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_placeholder_market_covers_every_class() {
        let items = PlaceholderDataSource.market_analysis().await.unwrap();
        for class in [AssetClass::Crypto, AssetClass::Forex, AssetClass::Stocks] {
            assert!(items.iter().any(|i| i.asset_class == class));
        }
        assert!(items.iter().all(|i| i.chart.len() == 12));
    }

    #[tokio::test]
    async fn test_live_source_without_endpoint_serves_catalog() {
        let client = ApiClient::builder()
            .config(ApiConfig {
                base_url: "http://127.0.0.1:9".into(),
                ..ApiConfig::default()
            })
            .build()
            .unwrap();
        let source = LiveDataSource::new(client, None);

        let names: Vec<String> = source
            .strategies()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            vec!["Momentum Trading", "Mean Reversion", "Breakout Trading"]
        );
    }

    #[tokio::test]
    async fn test_live_source_with_endpoint_calls_backend() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/strategies")
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;
        let client = ApiClient::builder()
            .config(ApiConfig {
                base_url: server.url(),
                ..ApiConfig::default()
            })
            .build()
            .unwrap();
        let source = LiveDataSource::new(client, Some("/strategies".into()));

        assert!(source.strategies().await.unwrap().is_empty());
        mock.assert_async().await;
    }
}

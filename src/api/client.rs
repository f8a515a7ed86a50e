//! SpreadEdge REST client.

use super::converter::{DataConverter, MarketAnalysis, RawSignal};
use super::{check_status, endpoint, http_client};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::state::{MarketItem, Signal, Strategy, Trader};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
    http: Option<reqwest::Client>,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            http: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing HTTP client instead of building one.
    pub fn http(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        let http = match self.http {
            Some(http) => http,
            None => http_client(&self.config)?,
        };
        Ok(ApiClient {
            http,
            base_url: self.config.base_url,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// High-level client for the SpreadEdge backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleFollowRequest<'a> {
    trader_id: &'a str,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the market overview.
    pub async fn fetch_market_analysis(&self) -> Result<Vec<MarketItem>> {
        let analysis: MarketAnalysis = self.get_json("/market/analysis").await?;
        Ok(DataConverter::convert_market_analysis(analysis))
    }

    /// Fetch current trading signals.
    pub async fn fetch_signals(&self) -> Result<Vec<Signal>> {
        let signals: Vec<RawSignal> = self.get_json("/signals").await?;
        Ok(signals
            .into_iter()
            .map(DataConverter::convert_signal)
            .collect())
    }

    /// Fetch traders available for copy trading.
    pub async fn fetch_traders(&self) -> Result<Vec<Trader>> {
        self.get_json("/copy-trade/traders").await
    }

    /// Follow or unfollow a trader. The backend flips the current state.
    pub async fn toggle_follow(&self, trader_id: &str) -> Result<()> {
        let path = "/copy-trade/toggle";
        let response = self
            .http
            .post(endpoint(&self.base_url, path))
            .json(&ToggleFollowRequest { trader_id })
            .send()
            .await?;
        check_status(response, path).await?;
        Ok(())
    }

    /// Fetch the strategy catalog from `path`.
    pub async fn fetch_strategies(&self, path: &str) -> Result<Vec<Strategy>> {
        self.get_json(path).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let response = self
            .http
            .get(endpoint(&self.base_url, path))
            .send()
            .await?;
        Ok(check_status(response, path).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::state::SignalType;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn client(server: &mockito::Server) -> ApiClient {
        ApiClient::builder()
            .config(ApiConfig {
                base_url: server.url(),
                ..ApiConfig::default()
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_signals() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/signals")
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"s1","symbol":"BTC","signal_type":"BUY","price":50000,
                     "timestamp":"2025-04-17T16:10:21.000Z","confidence":0.85}]"#,
            )
            .create_async()
            .await;

        let api = client(&server);
        assert_eq!(api.base_url(), server.url());
        let signals = api.fetch_signals().await.unwrap();

        mock.assert_async().await;
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].signal_type, SignalType::Buy);
        assert_eq!(signals[0].price, dec!(50000));
    }

    #[tokio::test]
    async fn test_fetch_traders_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/copy-trade/traders")
            .with_status(503)
            .create_async()
            .await;

        let err = client(&server).fetch_traders().await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 503, .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_toggle_follow_sends_trader_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/copy-trade/toggle")
            .match_body(Matcher::Json(serde_json::json!({"traderId": "42"})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(&server).toggle_follow("42").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_market_analysis_grouped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/market/analysis")
            .with_header("content-type", "application/json")
            .with_body(r#"{"forex":[{"symbol":"EUR/USD","price":1.08,"change":0.1,"volume":10}]}"#)
            .create_async()
            .await;

        let items = client(&server).fetch_market_analysis().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].symbol, "EUR/USD");
    }
}

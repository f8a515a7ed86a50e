//! Data conversion utilities for API responses.

use crate::state::{AssetClass, MarketItem, Signal, SignalType};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Market item as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarketItem {
    pub symbol: String,
    pub price: Decimal,
    #[serde(default)]
    pub change: Decimal,
    #[serde(default)]
    pub volume: Decimal,
    #[serde(rename = "chartData", default)]
    pub chart_data: Vec<f64>,
}

/// Body of `GET /market/analysis`: either a flat list, or a map of lists
/// keyed by asset class (with an optional `all` key repeating them).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MarketAnalysis {
    List(Vec<RawMarketItem>),
    Grouped(HashMap<String, Vec<RawMarketItem>>),
}

/// Signal as sent by the backend. The identifier is optional on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSignal {
    #[serde(default)]
    pub id: Option<String>,
    pub symbol: String,
    pub signal_type: String,
    pub price: Decimal,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Converts API responses to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Flatten a market analysis body into tagged items.
    pub fn convert_market_analysis(analysis: MarketAnalysis) -> Vec<MarketItem> {
        match analysis {
            MarketAnalysis::List(items) => items
                .into_iter()
                .map(|raw| {
                    let class = AssetClass::from_symbol(&raw.symbol);
                    Self::convert_market_item(raw, class)
                })
                .collect(),
            MarketAnalysis::Grouped(mut groups) => {
                let grouped: Vec<MarketItem> = [
                    ("crypto", AssetClass::Crypto),
                    ("forex", AssetClass::Forex),
                    ("stocks", AssetClass::Stocks),
                ]
                .into_iter()
                .flat_map(|(key, class)| {
                    groups
                        .remove(key)
                        .unwrap_or_default()
                        .into_iter()
                        .map(move |raw| Self::convert_market_item(raw, class))
                })
                .collect();

                if grouped.is_empty() {
                    // Only the combined list was sent.
                    Self::convert_market_analysis(MarketAnalysis::List(
                        groups.remove("all").unwrap_or_default(),
                    ))
                } else {
                    grouped
                }
            }
        }
    }

    /// Convert one market item with a known asset class.
    pub fn convert_market_item(raw: RawMarketItem, asset_class: AssetClass) -> MarketItem {
        MarketItem {
            symbol: raw.symbol,
            price: raw.price,
            change: raw.change,
            volume: raw.volume,
            chart: raw.chart_data,
            asset_class,
        }
    }

    /// Convert a backend signal, deriving an identifier when none was sent.
    pub fn convert_signal(raw: RawSignal) -> Signal {
        let timestamp = raw.timestamp.as_deref().and_then(Self::parse_timestamp);
        let id = raw.id.filter(|id| !id.is_empty()).unwrap_or_else(|| {
            format!(
                "{}_{}",
                raw.symbol,
                raw.timestamp.as_deref().unwrap_or_default()
            )
        });

        Signal {
            id,
            signal_type: SignalType::from_wire(&raw.signal_type),
            symbol: raw.symbol,
            price: raw.price,
            confidence: raw.confidence,
            timestamp,
        }
    }

    /// Parse an RFC 3339 timestamp, or a naive ISO timestamp taken as UTC.
    pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

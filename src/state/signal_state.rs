//! Trading signal feed state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    Buy,
    Sell,
    Neutral,
}

impl SignalType {
    /// Parse the backend spelling (`BUY`, `SELL`, `HOLD`, `NEUTRAL`), any case.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "BUY" => Self::Buy,
            "SELL" => Self::Sell,
            _ => Self::Neutral,
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Neutral => write!(f, "HOLD"),
        }
    }
}

/// A trading signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub symbol: String,
    pub signal_type: SignalType,
    pub price: Decimal,
    /// Confidence between 0 and 1.
    pub confidence: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Signal {
    /// Confidence as a percentage, clamped to 0..=100.
    pub fn confidence_percent(&self) -> f64 {
        (self.confidence.clamp(0.0, 1.0)) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spellings() {
        assert_eq!(SignalType::from_wire("BUY"), SignalType::Buy);
        assert_eq!(SignalType::from_wire("sell"), SignalType::Sell);
        assert_eq!(SignalType::from_wire("HOLD"), SignalType::Neutral);
        assert_eq!(SignalType::from_wire("neutral"), SignalType::Neutral);
    }

    #[test]
    fn test_confidence_percent_clamps() {
        let mut signal = Signal {
            id: "1".into(),
            symbol: "BTC".into(),
            signal_type: SignalType::Buy,
            price: Decimal::ONE,
            confidence: 0.875,
            timestamp: None,
        };
        assert!((signal.confidence_percent() - 87.5).abs() < f64::EPSILON);
        signal.confidence = 1.4;
        assert!((signal.confidence_percent() - 100.0).abs() < f64::EPSILON);
    }
}

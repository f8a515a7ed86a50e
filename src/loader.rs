//! Background fetches scoped to a screen's lifetime.

use crate::api::DataSource;
use crate::error::Result;
use crate::navigation::Tab;
use crate::state::{Action, FetchOutcome, FetchTicket, FollowToggle};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Runs screen fetches as tasks and reports their outcome as actions.
///
/// At most one fetch per screen is in flight; cancelling a screen aborts it.
pub struct ScreenLoader {
    source: Arc<dyn DataSource>,
    action_tx: mpsc::UnboundedSender<Action>,
    in_flight: HashMap<Tab, JoinHandle<()>>,
}

impl ScreenLoader {
    pub fn new(source: Arc<dyn DataSource>, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            source,
            action_tx,
            in_flight: HashMap::new(),
        }
    }

    /// Fetch the data behind `tab`, replacing any fetch still running for it.
    pub fn fetch(&mut self, tab: Tab, ticket: FetchTicket) {
        if !tab.fetches_data() {
            return;
        }
        self.cancel(tab);

        let source = Arc::clone(&self.source);
        let action_tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = match tab {
                Tab::Market => {
                    Action::MarketsLoaded(ticket, outcome(tab, source.market_analysis().await))
                }
                Tab::Signals => Action::SignalsLoaded(ticket, outcome(tab, source.signals().await)),
                Tab::Performance => {
                    Action::StrategiesLoaded(ticket, outcome(tab, source.strategies().await))
                }
                Tab::CopyTrade => {
                    Action::TradersLoaded(ticket, outcome(tab, source.traders().await))
                }
                Tab::Home | Tab::Profile => return,
            };
            if action_tx.send(action).is_err() {
                debug!(screen = tab.title(), "Store closed, dropping fetch result");
            }
        });
        self.in_flight.insert(tab, handle);
    }

    /// Abort the fetch running for `tab`, if any.
    pub fn cancel(&mut self, tab: Tab) {
        if let Some(handle) = self.in_flight.remove(&tab) {
            if !handle.is_finished() {
                debug!(screen = tab.title(), "Aborting fetch");
            }
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for tab in Tab::ALL {
            self.cancel(tab);
        }
    }

    /// Whether a fetch for `tab` is still running.
    pub fn is_in_flight(&self, tab: Tab) -> bool {
        self.in_flight
            .get(&tab)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Tell the backend to flip a trader's follow state. The local flip has
    /// already happened; failure is reported so it can be undone.
    pub fn toggle_follow(&self, toggle: FollowToggle) {
        let source = Arc::clone(&self.source);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = source.toggle_follow(&toggle.trader_id).await {
                warn!(trader_id = %toggle.trader_id, error = %e, "Failed to toggle follow");
                let _ = action_tx.send(Action::FollowToggleFailed(toggle));
            }
        });
    }
}

impl Drop for ScreenLoader {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

fn outcome<T>(tab: Tab, result: Result<Vec<T>>) -> FetchOutcome<T> {
    result.map_err(|e| {
        warn!(screen = tab.title(), error = %e, "Fetch failed");
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDataSource;
    use crate::error::Error;
    use crate::state::{Collection, Signal, SignalType, Strategy, Trader};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    struct SlowSource;

    #[async_trait]
    impl DataSource for SlowSource {
        async fn market_analysis(&self) -> Result<Vec<crate::state::MarketItem>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }

        async fn signals(&self) -> Result<Vec<Signal>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }

        async fn traders(&self) -> Result<Vec<Trader>> {
            Ok(vec![])
        }

        async fn toggle_follow(&self, _trader_id: &str) -> Result<()> {
            Ok(())
        }

        async fn strategies(&self) -> Result<Vec<Strategy>> {
            Ok(vec![])
        }
    }

    fn ticket() -> FetchTicket {
        Collection::<()>::default().mount()
    }

    #[tokio::test]
    async fn test_fetch_reports_loaded_action() {
        let mut source = MockDataSource::new();
        source.expect_signals().times(1).returning(|| {
            Ok(vec![Signal {
                id: "s1".into(),
                symbol: "BTC".into(),
                signal_type: SignalType::Buy,
                price: dec!(50000),
                confidence: 0.9,
                timestamp: None,
            }])
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut loader = ScreenLoader::new(Arc::new(source), tx);

        let issued = ticket();
        loader.fetch(Tab::Signals, issued);

        match rx.recv().await {
            Some(Action::SignalsLoaded(t, Ok(signals))) => {
                assert_eq!(t, issued);
                assert_eq!(signals.len(), 1);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_as_message() {
        let mut source = MockDataSource::new();
        source
            .expect_traders()
            .returning(|| Err(Error::application("backend down")));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut loader = ScreenLoader::new(Arc::new(source), tx);

        loader.fetch(Tab::CopyTrade, ticket());

        match rx.recv().await {
            Some(Action::TradersLoaded(_, Err(message))) => assert_eq!(message, "backend down"),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_fetch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut loader = ScreenLoader::new(Arc::new(SlowSource), tx);

        loader.fetch(Tab::Market, ticket());
        assert!(loader.is_in_flight(Tab::Market));
        loader.cancel(Tab::Market);
        assert!(!loader.is_in_flight(Tab::Market));

        let received = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(received.is_err());
    }

    #[tokio::test]
    async fn test_tabs_without_data_spawn_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut loader = ScreenLoader::new(Arc::new(MockDataSource::new()), tx);
        loader.fetch(Tab::Home, ticket());
        loader.fetch(Tab::Profile, ticket());
        assert!(!loader.is_in_flight(Tab::Home));
        assert!(!loader.is_in_flight(Tab::Profile));
    }

    #[tokio::test]
    async fn test_failed_toggle_asks_for_revert() {
        let mut source = MockDataSource::new();
        source
            .expect_toggle_follow()
            .withf(|id| id == "7")
            .returning(|_| Err(Error::application("nope")));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loader = ScreenLoader::new(Arc::new(source), tx);

        let toggle = FollowToggle {
            trader_id: "7".into(),
            restore: false,
            ticket: ticket(),
        };
        loader.toggle_follow(toggle.clone());

        match rx.recv().await {
            Some(Action::FollowToggleFailed(failed)) => assert_eq!(failed, toggle),
            other => panic!("unexpected action {other:?}"),
        }
    }
}

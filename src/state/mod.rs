//! State management for SpreadEdge.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Side effects
//! (HTTP, notifications) are performed by the app, which feeds their
//! results back as actions.

mod app_state;
mod collection;
mod copy_trade_state;
mod market_state;
mod performance_state;
mod signal_state;

pub use app_state::{
    AppState, AuthForm, FormField, HOME_SHORTCUTS, ProfileState, Toast, ToastLevel,
};
pub use collection::{Collection, FetchOutcome, FetchTicket};
pub use copy_trade_state::{CopyTradeState, Trader};
pub use market_state::{AssetClass, AssetFilter, MarketItem, MarketState};
pub use performance_state::{PerformanceState, Strategy, StrategyMetrics};
pub use signal_state::{Signal, SignalType};

use crate::error::Result;
use crate::navigation::{Navigator, Route, SessionCheck, Tab};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SwitchTab(Tab),
    NextTab,
    PrevTab,
    OpenRegister,
    Back,
    OpenShortcut,

    // Session
    SubmitLogin,
    LoginSucceeded { email: String },
    LoginFailed(String),
    SubmitRegister,
    Registered(String),
    RegisterFailed(String),
    Logout,
    RefreshSession,
    SessionRefreshed(bool),

    // Form input
    FormInput(char),
    FormBackspace,
    FormNextField,

    // Data
    Refresh,
    MarketsLoaded(FetchTicket, FetchOutcome<MarketItem>),
    SignalsLoaded(FetchTicket, FetchOutcome<Signal>),
    StrategiesLoaded(FetchTicket, FetchOutcome<Strategy>),
    TradersLoaded(FetchTicket, FetchOutcome<Trader>),

    // Screen actions
    CycleAssetFilter,
    ToggleFollow,
    FollowToggleFailed(FollowToggle),
    OpenStrategy,
    CloseStrategy,
    SendTestNotification,
    ToggleNotifications,
    ToggleDarkMode,
    PushRegistered(Option<String>),

    // UI actions
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowToast(Toast),
    DismissToast,

    // Quit
    Quit,
}

/// What changed when focus moved to another tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSwitch {
    /// Tab that was unmounted.
    pub left: Tab,
    /// Tab that now has focus.
    pub entered: Tab,
    /// Fetch to issue for the entered tab, if it shows backend data.
    pub ticket: Option<FetchTicket>,
}

/// A follow flag flipped locally ahead of the backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowToggle {
    pub trader_id: String,
    /// Flag to put back if the backend call fails.
    pub restore: bool,
    /// Fetch whose data was flipped.
    pub ticket: FetchTicket,
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Outer route stack and focused tab.
    pub nav: Navigator,
    /// Market screen.
    pub markets: MarketState,
    /// Signals screen.
    pub signals: Collection<Signal>,
    /// Performance screen.
    pub performance: PerformanceState,
    /// Copy-trade screen.
    pub copy_trade: CopyTradeState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            nav: Navigator::new(),
            markets: MarketState::default(),
            signals: Collection::default(),
            performance: PerformanceState::default(),
            copy_trade: CopyTradeState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Enter the main app through the session guard.
    pub fn enter_main_app(
        &mut self,
        session: &impl SessionCheck,
        email: Option<String>,
    ) -> Result<()> {
        self.nav.enter_main_app(session)?;
        if email.is_some() {
            self.app.profile.email = email;
        }
        self.app.form.reset();
        self.app.home_shortcut = 0;
        info!("Entered main app");
        Ok(())
    }

    /// Tear down every screen and return to the login route.
    pub fn leave_main_app(&mut self) {
        for tab in Tab::ALL {
            self.unmount(tab);
        }
        self.nav.reset_to_login();
        self.app.profile.email = None;
        self.app.show_help = false;
        self.app.form = AuthForm::default();
    }

    /// Move focus to `tab`, unmounting the previous screen and mounting the
    /// new one. `None` if focus did not change.
    pub fn switch_tab(&mut self, tab: Tab) -> Option<TabSwitch> {
        let left = self.nav.select_tab(tab)?;
        self.unmount(left);
        let ticket = self.mount(tab);
        debug!(from = left.title(), to = tab.title(), "Switched tab");
        Some(TabSwitch {
            left,
            entered: tab,
            ticket,
        })
    }

    /// Mount a screen. Returns the ticket of its initial fetch.
    pub fn mount(&mut self, tab: Tab) -> Option<FetchTicket> {
        match tab {
            Tab::Signals => Some(self.signals.mount()),
            Tab::Market => {
                self.markets.filter = AssetFilter::default();
                Some(self.markets.list.mount())
            }
            Tab::Performance => {
                self.performance.close_detail();
                Some(self.performance.list.mount())
            }
            Tab::CopyTrade => Some(self.copy_trade.list.mount()),
            Tab::Home | Tab::Profile => None,
        }
    }

    /// Unmount a screen. Its in-flight fetch becomes stale.
    pub fn unmount(&mut self, tab: Tab) {
        match tab {
            Tab::Signals => self.signals.unmount(),
            Tab::Market => self.markets.list.unmount(),
            Tab::Performance => {
                self.performance.close_detail();
                self.performance.list.unmount();
            }
            Tab::CopyTrade => self.copy_trade.list.unmount(),
            Tab::Home | Tab::Profile => {}
        }
    }

    /// Start a refresh of the focused screen.
    pub fn begin_refresh(&mut self) -> Option<(Tab, FetchTicket)> {
        if !self.nav.in_main_app() {
            return None;
        }
        let tab = self.nav.tab();
        let ticket = match tab {
            Tab::Signals => self.signals.begin_refresh(),
            Tab::Market => self.markets.list.begin_refresh(),
            Tab::Performance => self.performance.list.begin_refresh(),
            Tab::CopyTrade => self.copy_trade.list.begin_refresh(),
            Tab::Home | Tab::Profile => None,
        }?;
        Some((tab, ticket))
    }

    /// Flip the follow flag of the selected trader ahead of the backend call.
    pub fn toggle_selected_follow(&mut self) -> Option<FollowToggle> {
        let ticket = self.copy_trade.list.current_ticket()?;
        let trader_id = self.copy_trade.list.selected()?.id.clone();
        let following = self.copy_trade.toggle_follow(&trader_id)?;
        Some(FollowToggle {
            trader_id,
            restore: !following,
            ticket,
        })
    }

    /// Whether the focused screen has a fetch in flight.
    pub fn is_busy(&self) -> bool {
        match self.nav.tab() {
            Tab::Signals => self.signals.loading || self.signals.refreshing,
            Tab::Market => self.markets.list.loading || self.markets.list.refreshing,
            Tab::Performance => self.performance.list.loading || self.performance.list.refreshing,
            Tab::CopyTrade => self.copy_trade.list.loading || self.copy_trade.list.refreshing,
            Tab::Home | Tab::Profile => false,
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::OpenRegister => {
                if self.nav.open_register().is_ok() {
                    self.app.form.reset();
                }
            }
            Action::Back => {
                if self.nav.current() == Route::MainApp {
                    if self.nav.tab() == Tab::Performance {
                        self.performance.close_detail();
                    }
                } else if self.nav.back() {
                    self.app.form.reset();
                }
            }

            // Session
            Action::LoginFailed(message) | Action::RegisterFailed(message) => {
                self.app.form.submitting = false;
                self.app.form.error = Some(message);
            }
            Action::Registered(message) => {
                self.app.form.submitting = false;
                self.nav.back();
                self.app.form.reset();
                let message = if message.is_empty() {
                    "Account created, please log in".to_string()
                } else {
                    message
                };
                self.app.toast = Some(Toast::success(message));
            }
            Action::SessionRefreshed(true) => {
                self.app.toast = Some(Toast::success("Session refreshed"));
            }

            // Form input
            Action::FormInput(c) => self.app.form.push_char(c),
            Action::FormBackspace => self.app.form.pop_char(),
            Action::FormNextField => {
                let registering = self.nav.current() == Route::Register;
                self.app.form.next_field(registering);
            }

            // Data
            Action::MarketsLoaded(ticket, outcome) => {
                let filter = self.markets.filter;
                if self.markets.list.settle(ticket, outcome) {
                    self.markets.set_filter(filter);
                }
            }
            Action::SignalsLoaded(ticket, outcome) => {
                self.signals.settle(ticket, outcome);
            }
            Action::StrategiesLoaded(ticket, outcome) => {
                self.performance.list.settle(ticket, outcome);
            }
            Action::TradersLoaded(ticket, outcome) => {
                self.copy_trade.list.settle(ticket, outcome);
            }

            // Screen actions
            Action::CycleAssetFilter => {
                let next = self.markets.filter.next();
                self.markets.set_filter(next);
            }
            Action::FollowToggleFailed(toggle) => {
                if !self.copy_trade.list.is_current(toggle.ticket) {
                    debug!(trader_id = %toggle.trader_id, "Traders reloaded, dropping follow revert");
                } else if self.copy_trade.set_follow(&toggle.trader_id, toggle.restore) {
                    self.app.toast = Some(Toast::warning("Could not update follow status"));
                }
            }
            Action::OpenStrategy => self.performance.open_selected(),
            Action::CloseStrategy => self.performance.close_detail(),
            Action::ToggleDarkMode => {
                self.app.profile.dark_mode = !self.app.profile.dark_mode;
            }
            Action::PushRegistered(token) => {
                self.app.profile.push_token = token;
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowToast(toast) => self.app.toast = Some(toast),
            Action::DismissToast => self.app.toast = None,

            // Quit
            Action::Quit => self.app.should_quit = true,

            // Side effects, handled by the app before reaching the store
            Action::SwitchTab(_)
            | Action::NextTab
            | Action::PrevTab
            | Action::OpenShortcut
            | Action::SubmitLogin
            | Action::LoginSucceeded { .. }
            | Action::SubmitRegister
            | Action::Logout
            | Action::RefreshSession
            | Action::SessionRefreshed(false)
            | Action::Refresh
            | Action::ToggleFollow
            | Action::SendTestNotification
            | Action::ToggleNotifications => {}
        }
    }

    fn scroll(&mut self, delta: i32) {
        if !self.nav.in_main_app() {
            return;
        }
        match self.nav.tab() {
            Tab::Home => self.app.move_shortcut(delta),
            Tab::Signals => {
                let len = self.signals.items.len();
                self.signals.scroll(delta, len);
            }
            Tab::Market => {
                let len = self.markets.filtered_items().len();
                self.markets.list.scroll(delta, len);
            }
            Tab::Performance => {
                if self.performance.detail.is_none() {
                    let len = self.performance.list.items.len();
                    self.performance.list.scroll(delta, len);
                }
            }
            Tab::CopyTrade => {
                let len = self.copy_trade.list.items.len();
                self.copy_trade.list.scroll(delta, len);
            }
            Tab::Profile => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    fn signed_in() -> Store {
        let mut store = store();
        store
            .enter_main_app(&true, Some("a@b.com".into()))
            .unwrap();
        store
    }

    fn trader(id: &str, following: bool) -> Trader {
        Trader {
            id: id.into(),
            name: format!("trader {id}"),
            performance: dec!(12.5),
            trades: 10,
            win_rate: 0.6,
            is_following: following,
        }
    }

    #[test]
    fn test_enter_main_app_refused_without_session() {
        let mut store = store();
        assert!(store.enter_main_app(&false, None).is_err());
        assert_eq!(store.nav.current(), Route::Login);
    }

    #[test]
    fn test_logout_leaves_only_login() {
        let mut store = signed_in();
        store.switch_tab(Tab::Signals);
        store.leave_main_app();

        assert_eq!(store.nav.stack(), &[Route::Login]);
        assert!(!store.signals.is_mounted());
        assert_eq!(store.app.profile.email, None);
    }

    #[test]
    fn test_switch_tab_mounts_and_unmounts() {
        let mut store = signed_in();
        let switch = store.switch_tab(Tab::Signals).unwrap();
        assert_eq!(switch.left, Tab::Home);
        assert!(switch.ticket.is_some());
        assert!(store.signals.loading);

        let switch = store.switch_tab(Tab::Market).unwrap();
        assert_eq!(switch.left, Tab::Signals);
        assert!(!store.signals.is_mounted());
        assert!(store.markets.list.loading);

        assert_eq!(store.switch_tab(Tab::Market), None);
    }

    #[test]
    fn test_result_after_tab_switch_is_ignored() {
        let mut store = signed_in();
        let ticket = store.switch_tab(Tab::CopyTrade).unwrap().ticket.unwrap();
        store.switch_tab(Tab::Profile);

        store.reduce(Action::TradersLoaded(ticket, Ok(vec![trader("1", false)])));
        assert!(store.copy_trade.list.items.is_empty());
    }

    #[test]
    fn test_failed_follow_toggle_restores_flag() {
        let mut store = signed_in();
        let ticket = store.switch_tab(Tab::CopyTrade).unwrap().ticket.unwrap();
        store.reduce(Action::TradersLoaded(ticket, Ok(vec![trader("1", false)])));

        let toggle = store.toggle_selected_follow().unwrap();
        assert!(store.copy_trade.list.items[0].is_following);
        assert!(!toggle.restore);

        store.reduce(Action::FollowToggleFailed(toggle));
        assert!(!store.copy_trade.list.items[0].is_following);
        assert_eq!(
            store.app.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Warning)
        );
    }

    #[test]
    fn test_failed_follow_toggle_skips_reloaded_traders() {
        let mut store = signed_in();
        let ticket = store.switch_tab(Tab::CopyTrade).unwrap().ticket.unwrap();
        store.reduce(Action::TradersLoaded(ticket, Ok(vec![trader("1", false)])));
        let toggle = store.toggle_selected_follow().unwrap();

        store.switch_tab(Tab::Home);
        let ticket = store.switch_tab(Tab::CopyTrade).unwrap().ticket.unwrap();
        store.reduce(Action::TradersLoaded(ticket, Ok(vec![trader("1", false)])));

        store.reduce(Action::FollowToggleFailed(toggle));
        assert!(!store.copy_trade.list.items[0].is_following);
        assert!(store.app.toast.is_none());
    }

    #[test]
    fn test_refresh_only_on_data_tabs() {
        let mut store = signed_in();
        assert_eq!(store.begin_refresh(), None);

        let ticket = store.switch_tab(Tab::Signals).unwrap().ticket.unwrap();
        store.reduce(Action::SignalsLoaded(ticket, Ok(vec![])));
        let (tab, _) = store.begin_refresh().unwrap();
        assert_eq!(tab, Tab::Signals);
        assert!(store.signals.refreshing);
        assert!(store.is_busy());
    }

    #[test]
    fn test_login_failure_shows_under_form() {
        let mut store = store();
        store.app.form.submitting = true;
        store.reduce(Action::LoginFailed("Invalid credentials".into()));
        assert!(!store.app.form.submitting);
        assert_eq!(store.app.form.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_registered_returns_to_login() {
        let mut store = store();
        store.reduce(Action::OpenRegister);
        assert_eq!(store.nav.current(), Route::Register);

        store.reduce(Action::Registered(String::new()));
        assert_eq!(store.nav.current(), Route::Login);
        assert_eq!(
            store.app.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Success)
        );
    }

    #[test]
    fn test_market_filter_survives_reload() {
        let mut store = signed_in();
        let ticket = store.switch_tab(Tab::Market).unwrap().ticket.unwrap();
        store.reduce(Action::CycleAssetFilter);
        assert_eq!(store.markets.filter, AssetFilter::Forex);

        store.reduce(Action::MarketsLoaded(ticket, Ok(vec![])));
        assert_eq!(store.markets.filter, AssetFilter::Forex);
        assert_eq!(store.markets.list.selected_index, None);
    }
}

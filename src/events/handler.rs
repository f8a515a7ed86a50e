//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::navigation::{Route, Tab};
use crate::state::{Action, Store};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for input before yielding.
    poll_interval: Duration,
    /// Whether mouse events produce actions.
    mouse_support: bool,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy)]
struct StoreSnapshot {
    route: Route,
    tab: Tab,
    show_help: bool,
    strategy_open: bool,
}

impl EventHandler {
    /// Create a new event handler with the given bindings.
    pub fn new(keybindings: KeyBindings, poll_interval: Duration, mouse_support: bool) -> Self {
        Self {
            keybindings,
            poll_interval,
            mouse_support,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            route: store.nav.current(),
            tab: store.nav.tab(),
            show_help: store.app.show_help,
            strategy_open: store.performance.detail.is_some(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.poll_interval)? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key)),
                CrosstermEvent::Mouse(mouse) => return Ok(self.handle_mouse(mouse)),
                CrosstermEvent::Resize(_, _) => {
                    // Terminal will automatically redraw
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        let snapshot = self.store_snapshot?;
        match snapshot.route {
            Route::Login | Route::Register => self.handle_form(key, snapshot.route),
            Route::MainApp => self.handle_main_app(key, snapshot),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if !self.mouse_support {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_form(&self, key: KeyEvent, route: Route) -> Option<Action> {
        let input = InputEvent::from(key);

        match key.code {
            KeyCode::Enter => {
                return Some(match route {
                    Route::Register => Action::SubmitRegister,
                    _ => Action::SubmitLogin,
                });
            }
            KeyCode::Esc if route == Route::Register => return Some(Action::Back),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                return Some(Action::FormNextField);
            }
            KeyCode::Backspace => return Some(Action::FormBackspace),
            _ => {}
        }

        if route == Route::Login && input.matches("Ctrl+r") {
            return Some(Action::OpenRegister);
        }

        input.text().map(Action::FormInput)
    }

    fn handle_main_app(&self, key: KeyEvent, snapshot: StoreSnapshot) -> Option<Action> {
        let input = InputEvent::from(key);
        let kb = &self.keybindings;

        if snapshot.show_help {
            if input.matches(&kb.help) || input.matches(&kb.back) || input.matches(&kb.quit) {
                return Some(Action::ToggleHelp);
            }
            return None;
        }

        // Global shortcuts
        if input.matches(&kb.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&kb.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&kb.refresh) {
            return Some(Action::Refresh);
        }
        if input.matches(&kb.back) {
            return Some(if snapshot.strategy_open {
                Action::CloseStrategy
            } else {
                Action::Back
            });
        }

        // Tab switching
        if input.matches(&kb.next_tab) {
            return Some(Action::NextTab);
        }
        if input.matches(&kb.prev_tab) {
            return Some(Action::PrevTab);
        }
        let tab_keys = [
            (&kb.home, Tab::Home),
            (&kb.signals, Tab::Signals),
            (&kb.market, Tab::Market),
            (&kb.performance, Tab::Performance),
            (&kb.copy_trade, Tab::CopyTrade),
            (&kb.profile, Tab::Profile),
        ];
        if let Some((_, tab)) = tab_keys.iter().find(|(binding, _)| input.matches(binding)) {
            return Some(Action::SwitchTab(*tab));
        }

        // Navigation
        if input.matches(&kb.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&kb.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        match key.code {
            KeyCode::PageUp => return Some(Action::PageUp),
            KeyCode::PageDown => return Some(Action::PageDown),
            KeyCode::Home => return Some(Action::GoToTop),
            KeyCode::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // Tab-specific actions
        match snapshot.tab {
            Tab::Home => input.matches(&kb.select).then_some(Action::OpenShortcut),
            Tab::Signals => input
                .matches(&kb.test_notification)
                .then_some(Action::SendTestNotification),
            Tab::Market => input.matches(&kb.filter).then_some(Action::CycleAssetFilter),
            Tab::Performance => (input.matches(&kb.select) && !snapshot.strategy_open)
                .then_some(Action::OpenStrategy),
            Tab::CopyTrade => (input.matches(&kb.follow) || input.matches(&kb.select))
                .then_some(Action::ToggleFollow),
            Tab::Profile => self.handle_profile(input),
        }
    }

    fn handle_profile(&self, input: InputEvent) -> Option<Action> {
        let kb = &self.keybindings;
        if input.matches(&kb.refresh_session) {
            Some(Action::RefreshSession)
        } else if input.matches(&kb.toggle_notifications) {
            Some(Action::ToggleNotifications)
        } else if input.matches(&kb.toggle_dark_mode) {
            Some(Action::ToggleDarkMode)
        } else if input.matches(&kb.logout) {
            Some(Action::Logout)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn handler_for(store: &Store) -> EventHandler {
        let mut handler =
            EventHandler::new(KeyBindings::default(), Duration::from_millis(10), true);
        handler.update_store_snapshot(store);
        handler
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_login_form_typing() {
        let store = store();
        let handler = handler_for(&store);

        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::FormInput('q'))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::SubmitLogin)
        ));
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::OpenRegister)
        ));
    }

    #[test]
    fn test_main_app_tab_keys() {
        let mut store = store();
        store.enter_main_app(&true, None).unwrap();
        let handler = handler_for(&store);

        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('3'))),
            Some(Action::SwitchTab(Tab::Market))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Tab)),
            Some(Action::NextTab)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::OpenShortcut)
        ));
    }

    #[test]
    fn test_screen_specific_keys() {
        let mut store = store();
        store.enter_main_app(&true, None).unwrap();

        store.switch_tab(Tab::Signals);
        let handler = handler_for(&store);
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('t'))),
            Some(Action::SendTestNotification)
        ));

        store.switch_tab(Tab::Profile);
        let handler = handler_for(&store);
        assert!(matches!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT)),
            Some(Action::Logout)
        ));
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut store = store();
        store.enter_main_app(&true, None).unwrap();
        store.app.show_help = true;
        let handler = handler_for(&store);

        assert!(handler.handle_key(press(KeyCode::Char('2'))).is_none());
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::ToggleHelp)
        ));
    }
}

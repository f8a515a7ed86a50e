//! Outer route stack with a guarded entry into the main application.

use super::Tab;
use crate::error::{Error, Result};

/// A route on the outer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Register,
    MainApp,
}

/// Answers whether a session exists. Consulted before entering the main app.
pub trait SessionCheck {
    fn has_session(&self) -> bool;
}

impl SessionCheck for bool {
    fn has_session(&self) -> bool {
        *self
    }
}

/// Stack navigator plus the focused tab of the main application.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
    tab: Tab,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the login route.
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Login],
            tab: Tab::Home,
        }
    }

    /// The route on top of the stack.
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or_default()
    }

    /// The whole stack, bottom first.
    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    /// The focused tab. Only meaningful while in the main app.
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Whether the main application is showing.
    pub fn in_main_app(&self) -> bool {
        self.current() == Route::MainApp
    }

    /// Push the register route on top of login.
    pub fn open_register(&mut self) -> Result<()> {
        if self.current() != Route::Login {
            return Err(Error::navigation("Register is only reachable from Login"));
        }
        self.stack.push(Route::Register);
        Ok(())
    }

    /// Pop one route. The last route is never popped and the main app has
    /// nothing under it to return to.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 && self.current() != Route::MainApp {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Enter the main application if `session` reports a valid session.
    ///
    /// The stack is replaced so that backing out of the main app cannot
    /// land on the login form.
    pub fn enter_main_app(&mut self, session: &impl SessionCheck) -> Result<()> {
        if !session.has_session() {
            return Err(Error::navigation("A session is required to enter the app"));
        }
        self.stack = vec![Route::MainApp];
        self.tab = Tab::Home;
        Ok(())
    }

    /// Drop all history and return to the login route.
    pub fn reset_to_login(&mut self) {
        self.stack = vec![Route::Login];
        self.tab = Tab::Home;
    }

    /// Focus a tab. Returns the previously focused tab when focus changed.
    pub fn select_tab(&mut self, tab: Tab) -> Option<Tab> {
        if !self.in_main_app() || self.tab == tab {
            return None;
        }
        let previous = self.tab;
        self.tab = tab;
        Some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_main_app_requires_session() {
        let mut nav = Navigator::new();
        assert!(matches!(
            nav.enter_main_app(&false),
            Err(Error::Navigation(_))
        ));
        assert_eq!(nav.current(), Route::Login);

        nav.enter_main_app(&true).unwrap();
        assert_eq!(nav.stack(), &[Route::MainApp]);
    }

    #[test]
    fn test_logout_leaves_only_login() {
        let mut nav = Navigator::new();
        nav.open_register().unwrap();
        nav.back();
        nav.enter_main_app(&true).unwrap();
        nav.select_tab(Tab::Profile);

        nav.reset_to_login();
        assert_eq!(nav.stack(), &[Route::Login]);
        assert_eq!(nav.tab(), Tab::Home);
        assert!(!nav.back());
    }

    #[test]
    fn test_register_back_to_login() {
        let mut nav = Navigator::new();
        nav.open_register().unwrap();
        assert_eq!(nav.current(), Route::Register);
        assert!(nav.open_register().is_err());
        assert!(nav.back());
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn test_tabs_only_switch_inside_main_app() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select_tab(Tab::Market), None);

        nav.enter_main_app(&true).unwrap();
        assert_eq!(nav.select_tab(Tab::Market), Some(Tab::Home));
        assert_eq!(nav.select_tab(Tab::Market), None);
        assert!(!nav.back());
    }
}

//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod theme;
mod widgets;

pub use layout::Layout;
pub use theme::Theme;
pub use widgets::{
    HelpPanel, HomePanel, LoginForm, MarketList, ProfilePanel, SignalList, StatusBar,
    StrategyList, TabBar, TraderList,
};

use crate::config::{Config, KeyBindings};
use crate::navigation::{Route, Tab};
use crate::state::Store;
use ratatui::{Frame, widgets::Block};

/// Main UI renderer.
#[derive(Debug, Clone)]
pub struct Ui {
    theme: Theme,
    keybindings: KeyBindings,
    show_status_bar: bool,
    show_help_bar: bool,
}

impl Ui {
    pub fn new(config: &Config) -> Self {
        Self {
            theme: Theme::from_config(&config.theme),
            keybindings: config.keybindings.clone(),
            show_status_bar: config.ui.show_status_bar,
            show_help_bar: config.ui.show_help_bar,
        }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let dark_mode = store.app.profile.dark_mode;
        let theme = if dark_mode {
            self.theme
        } else {
            self.theme.light()
        };
        frame.render_widget(Block::default().style(theme.base(dark_mode)), frame.area());

        let in_main_app = store.nav.current() == Route::MainApp;
        let layout = Layout::new(
            frame.area(),
            self.show_status_bar,
            in_main_app,
            self.show_help_bar,
        );

        if let Some(area) = layout.status_area {
            StatusBar::render(frame, area, store, &theme);
        }
        if let Some(area) = layout.tab_area {
            TabBar::render(frame, area, store, &theme);
        }
        if let Some(area) = layout.hint_area {
            widgets::render_hints(frame, area, store, &self.keybindings, &theme);
        }

        // Render main content based on route and tab
        match store.nav.current() {
            Route::Login | Route::Register => {
                LoginForm::render(frame, layout.main_area, store, &theme);
            }
            Route::MainApp => match store.nav.tab() {
                Tab::Home => HomePanel::render(frame, layout.main_area, store, &theme),
                Tab::Signals => SignalList::render(frame, layout.main_area, store, &theme),
                Tab::Market => MarketList::render(frame, layout.main_area, store, &theme),
                Tab::Performance => StrategyList::render(frame, layout.main_area, store, &theme),
                Tab::CopyTrade => TraderList::render(frame, layout.main_area, store, &theme),
                Tab::Profile => ProfilePanel::render(frame, layout.main_area, store, &theme),
            },
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &self.keybindings, &theme);
        }

        // Render toast if present
        if let Some(toast) = &store.app.toast {
            widgets::render_toast(frame, layout.toast_area, toast, &theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn rendered(store: &Store) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let ui = Ui::new(&Config::default());
        terminal.draw(|frame| ui.render(frame, store)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    #[test]
    fn test_login_route_renders_form() {
        let screen = rendered(&store());
        assert!(screen.contains("Login"));
        assert!(screen.contains("Email"));
    }

    #[test]
    fn test_every_tab_renders() {
        let mut store = store();
        store.enter_main_app(&true, Some("a@b.com".into())).unwrap();
        for tab in Tab::ALL {
            store.switch_tab(tab);
            let screen = rendered(&store);
            assert!(screen.contains(tab.title()), "{} missing", tab.title());
        }
    }
}

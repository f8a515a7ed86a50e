//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, side effects, and rendering.

use crate::api::{self, ApiClient, DataSource, LiveDataSource, PlaceholderDataSource};
use crate::auth::{AuthClient, FileTokenStore, Registration};
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::events::EventHandler;
use crate::loader::ScreenLoader;
use crate::navigation::Tab;
use crate::notifications::{LocalNotification, NotificationService, Platform, PushRegistration};
use crate::state::{Action, Store, Toast};
use crate::ui::Ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Renderer.
    ui: Ui,
    /// Event handler.
    event_handler: EventHandler,
    /// Action sender, cloned into background tasks.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Delivered local notifications.
    notification_rx: mpsc::UnboundedReceiver<LocalNotification>,
    /// Session handling.
    auth: AuthClient,
    /// Notification service shared with background tasks.
    notifier: Arc<NotificationService>,
    /// Per-screen fetches.
    loader: ScreenLoader,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        let http = api::http_client(&config.api)?;

        let token_path = match &config.api.token_path {
            Some(path) => path.clone(),
            None => config::token_file()?,
        };
        let token_store = FileTokenStore::new(token_path);
        debug!(path = %token_store.path().display(), "Using token file");
        let auth = AuthClient::new(
            http.clone(),
            config.api.base_url.clone(),
            Arc::new(token_store),
        );

        let source: Arc<dyn DataSource> = if config.api.mock_data {
            info!("Using placeholder data");
            Arc::new(PlaceholderDataSource)
        } else {
            let client = ApiClient::builder()
                .config(config.api.clone())
                .http(http)
                .build()?;
            info!(base_url = client.base_url(), "Using live data");
            Arc::new(LiveDataSource::new(
                client,
                config.api.strategies_endpoint.clone(),
            ))
        };

        let platform = Platform::detect(&config.notifications.platform);
        let (notifier, notification_rx) =
            NotificationService::new(platform, config.notifications.enabled);

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        // Create store
        let mut store = Store::new(action_tx.clone());
        store.app.profile.notifications_enabled = config.notifications.enabled;

        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms.max(10)),
            config.ui.mouse_support,
        );
        let loader = ScreenLoader::new(source, action_tx.clone());
        let ui = Ui::new(&config);

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.ui.mouse_support {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            store,
            ui,
            event_handler,
            action_tx,
            action_rx,
            notification_rx,
            auth,
            notifier: Arc::new(notifier),
            loader,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.register_for_push();

        // Restore a persisted session
        if self.auth.is_authenticated() {
            info!("Restoring saved session");
            self.enter_main_app(None);
        }

        // Main event loop
        loop {
            self.store.app.expire_toast(Instant::now());

            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            let ui = &self.ui;
            let store = &self.store;
            self.terminal.draw(|frame| ui.render(frame, store))?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                // Handle delivered notifications
                Some(notification) = self.notification_rx.recv() => {
                    self.show_notification(notification);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        info!("Shutting down");
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SwitchTab(tab) => self.switch_tab(tab),
            Action::NextTab => self.switch_tab(self.store.nav.tab().next()),
            Action::PrevTab => self.switch_tab(self.store.nav.tab().prev()),
            Action::OpenShortcut => self.switch_tab(self.store.app.selected_shortcut()),
            Action::Refresh => {
                if let Some((tab, ticket)) = self.store.begin_refresh() {
                    self.loader.fetch(tab, ticket);
                }
            }
            Action::SubmitLogin => self.submit_login(),
            Action::SubmitRegister => self.submit_register(),
            Action::LoginSucceeded { email } => self.enter_main_app(Some(email)),
            Action::Logout => {
                self.logout();
                self.store.reduce(Action::ShowToast(Toast::info("Logged out")));
            }
            Action::RefreshSession => self.refresh_session(),
            Action::SessionRefreshed(false) => {
                self.logout();
                self.store.reduce(Action::ShowToast(Toast::warning(
                    "Session expired, please log in again",
                )));
            }
            Action::ToggleFollow => {
                if let Some(toggle) = self.store.toggle_selected_follow() {
                    self.loader.toggle_follow(toggle);
                }
            }
            Action::SendTestNotification => self.send_test_notification(),
            Action::ToggleNotifications => self.toggle_notifications(),
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }

    /// Move to another tab, cancelling the fetch of the one left behind.
    fn switch_tab(&mut self, tab: Tab) {
        if let Some(switch) = self.store.switch_tab(tab) {
            self.loader.cancel(switch.left);
            if let Some(ticket) = switch.ticket {
                self.loader.fetch(switch.entered, ticket);
            }
        }
    }

    fn enter_main_app(&mut self, email: Option<String>) {
        if let Err(e) = self.store.enter_main_app(&self.auth, email) {
            warn!(error = %e, "Refused to enter main app");
            self.store.reduce(Action::LoginFailed(e.to_string()));
        }
    }

    fn logout(&mut self) {
        self.auth.logout();
        self.loader.cancel_all();
        self.store.leave_main_app();
    }

    fn submit_login(&mut self) {
        let form = &mut self.store.app.form;
        if form.submitting {
            return;
        }
        if !form.is_complete() {
            form.error = Some("Email and password are required".to_string());
            return;
        }
        form.submitting = true;
        form.error = None;

        let email = form.email.trim().to_string();
        let password = form.password.clone();
        let auth = self.auth.clone();
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match auth.login(&email, &password).await {
                Ok(tokens) if !tokens.access_token.is_empty() => Action::LoginSucceeded { email },
                Ok(_) => Action::LoginFailed("No access token received".to_string()),
                Err(e) => {
                    warn!(error = %e, "Login failed");
                    Action::LoginFailed(failure_message(&e))
                }
            };
            let _ = action_tx.send(action);
        });
    }

    fn submit_register(&mut self) {
        let form = &mut self.store.app.form;
        if form.submitting {
            return;
        }
        if !form.is_complete() {
            form.error = Some("Email and password are required".to_string());
            return;
        }
        form.submitting = true;
        form.error = None;

        let full_name = form.full_name.trim();
        let registration = Registration {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
        };
        let auth = self.auth.clone();
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match auth.register(&registration).await {
                Ok(message) => Action::Registered(message),
                Err(e) => {
                    warn!(error = %e, "Registration failed");
                    Action::RegisterFailed(failure_message(&e))
                }
            };
            let _ = action_tx.send(action);
        });
    }

    fn refresh_session(&self) {
        let auth = self.auth.clone();
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match auth.refresh_token().await {
                Some(_) => Action::SessionRefreshed(true),
                // Refresh declined but the stored session is untouched
                None if auth.is_authenticated() => {
                    Action::ShowToast(Toast::warning("Session was not refreshed"))
                }
                None => Action::SessionRefreshed(false),
            };
            let _ = action_tx.send(action);
        });
    }

    fn register_for_push(&self) {
        let notifier = Arc::clone(&self.notifier);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let registration = notifier.register_for_push_notifications().await;
            let _ = action_tx.send(Action::PushRegistered(push_token(registration)));
        });
    }

    fn send_test_notification(&self) {
        let notifier = Arc::clone(&self.notifier);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let sent = notifier
                .send_local_notification(
                    "Test Notification",
                    "This is a test notification from SpreadEdge",
                    Some(serde_json::json!({ "screen": "signals" })),
                )
                .await;
            if let Err(e) = sent {
                let _ = action_tx.send(Action::ShowToast(
                    Toast::warning(e.to_string()).with_title("Notification not sent"),
                ));
            }
        });
    }

    fn toggle_notifications(&mut self) {
        let enabled = !self.store.app.profile.notifications_enabled;
        self.store.app.profile.notifications_enabled = enabled;
        info!(enabled, "Push notifications preference changed");

        let notifier = Arc::clone(&self.notifier);
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let registration = notifier.update_preference(enabled).await;
            let _ = action_tx.send(Action::PushRegistered(push_token(registration)));
        });
    }

    fn show_notification(&mut self, notification: LocalNotification) {
        info!(
            id = %notification.id,
            title = %notification.title,
            data = %notification.data,
            "Notification received"
        );
        let toast = Toast::info(notification.body)
            .with_title(notification.title)
            .with_duration(Duration::from_secs(self.config.ui.toast_secs));
        self.store.reduce(Action::ShowToast(toast));
    }
}

/// Token to show on the profile screen for a registration attempt.
fn push_token(registration: Option<PushRegistration>) -> Option<String> {
    match registration {
        Some(PushRegistration::Token(token)) => Some(token),
        Some(PushRegistration::Permission(granted)) => {
            info!(granted, "Notification permission answered");
            None
        }
        None => None,
    }
}

/// Short message for a failed login or registration.
fn failure_message(error: &Error) -> String {
    match error {
        Error::Status { status: 400 | 401 | 403, .. } => "Invalid email or password".to_string(),
        Error::Status { status: 409, .. } => "Account already exists".to_string(),
        Error::Http(_) => "Could not reach the server".to_string(),
        other => other.to_string(),
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

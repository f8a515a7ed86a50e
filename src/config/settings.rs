//! Configuration settings for SpreadEdge.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the backend host.
const API_URL_ENV: &str = "API_URL";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Notification configuration.
    pub notifications: NotificationConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered with `SPREADEDGE__SECTION__KEY`
    /// environment variables and the `API_URL` override.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);

        let mut loaded: Self = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SPREADEDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            loaded.api.base_url = url;
        }

        Ok(loaded)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Write the built-in defaults to `path` unless a file is already there.
    /// Environment overrides never reach the file. Returns whether it wrote.
    pub fn write_default_if_missing(path: Option<PathBuf>) -> crate::Result<bool> {
        let config_path = path.unwrap_or_else(default_path);
        if config_path.exists() {
            return Ok(false);
        }
        Self::default().save(Some(config_path))?;
        Ok(true)
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Serve screens from built-in placeholder data instead of the backend.
    pub mock_data: bool,
    /// Path of the strategy endpoint, if the backend provides one.
    pub strategies_endpoint: Option<String>,
    /// Where the token pair is persisted (defaults to the data directory).
    pub token_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            mock_data: false,
            strategies_endpoint: None,
            token_path: None,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Show help bar.
    pub show_help_bar: bool,
    /// How long toasts stay on screen, in seconds.
    pub toast_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            show_status_bar: true,
            show_help_bar: true,
            toast_secs: 4,
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Whether the user allows notifications. Answers permission requests.
    pub enabled: bool,
    /// Delivery path: `auto`, `web` or `native`.
    pub platform: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            platform: "auto".to_string(),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Refresh the current screen.
    pub refresh: String,
    /// Next tab.
    pub next_tab: String,
    /// Previous tab.
    pub prev_tab: String,
    /// Switch to the home tab.
    pub home: String,
    /// Switch to the signals tab.
    pub signals: String,
    /// Switch to the market tab.
    pub market: String,
    /// Switch to the performance tab.
    pub performance: String,
    /// Switch to the copy-trade tab.
    pub copy_trade: String,
    /// Switch to the profile tab.
    pub profile: String,
    /// Cycle the market asset filter.
    pub filter: String,
    /// Toggle following the selected trader.
    pub follow: String,
    /// Send a test notification.
    pub test_notification: String,
    /// Refresh the session token.
    pub refresh_session: String,
    /// Toggle push notifications preference.
    pub toggle_notifications: String,
    /// Toggle dark mode preference.
    pub toggle_dark_mode: String,
    /// Log out.
    pub logout: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            next_tab: "Tab".to_string(),
            prev_tab: "BackTab".to_string(),
            home: "1".to_string(),
            signals: "2".to_string(),
            market: "3".to_string(),
            performance: "4".to_string(),
            copy_trade: "5".to_string(),
            profile: "6".to_string(),
            filter: "f".to_string(),
            follow: "Space".to_string(),
            test_notification: "t".to_string(),
            refresh_session: "s".to_string(),
            toggle_notifications: "n".to_string(),
            toggle_dark_mode: "d".to_string(),
            logout: "L".to_string(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Primary color (hex), also the active tab tint.
    pub primary: String,
    /// Accent color (hex).
    pub accent: String,
    /// Inactive tab tint.
    pub inactive: String,
    /// Gain/buy color (hex).
    pub positive: String,
    /// Loss/sell color (hex).
    pub negative: String,
    /// Neutral/hold color (hex).
    pub neutral: String,
    /// Error color (hex).
    pub error: String,
    /// Foreground/text color (hex).
    pub foreground: String,
    /// Border color (hex).
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#6200ee".to_string(),
            accent: "#03dac4".to_string(),
            inactive: "gray".to_string(),
            positive: "#4caf50".to_string(),
            negative: "#f44336".to_string(),
            neutral: "#ffc107".to_string(),
            error: "#b00020".to_string(),
            foreground: "#cdd6f4".to_string(),
            border: "#45475a".to_string(),
        }
    }
}

//! Error types for the SpreadEdge client.

use thiserror::Error;

/// The main error type for SpreadEdge.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status} for {path}")]
    Status { status: u16, path: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Notification permission has not been granted.
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Notifications attempted on a platform with no delivery path.
    #[error("Notifications are not supported on platform '{0}'")]
    PlatformUnsupported(String),

    /// A navigation transition was refused.
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new status error for a request path.
    pub fn status(status: reqwest::StatusCode, path: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            path: path.into(),
        }
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new auth error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new navigation error.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Channel(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

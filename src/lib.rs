//! # SpreadEdge - Trading signals in the terminal
//!
//! A terminal client for the SpreadEdge trading-signals service: market
//! overview, signal feed, strategy performance, copy trading and a profile
//! screen behind a login. Built with ratatui and reqwest.
//!
//! ## Architecture
//!
//! The application follows a clean architecture pattern:
//!
//! - **App**: Event loop, side effects and lifecycle management
//! - **UI**: Layout and rendering logic
//! - **API**: Backend client and the `DataSource` seam screens fetch through
//! - **Auth**: Token pair persistence, login, refresh
//! - **Navigation**: Guarded route stack and main-app tabs
//! - **Notifications**: Permission, push registration, local notifications
//! - **State**: Centralized state management
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod navigation;
pub mod notifications;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};

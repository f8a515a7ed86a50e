//! Navigation shell.
//!
//! Two levels: an outer stack (login, register, main app) whose entry into
//! the main app is guarded by a session check, and the tab set inside the
//! main app.

mod stack;
mod tabs;

pub use stack::{Navigator, Route, SessionCheck};
pub use tabs::Tab;

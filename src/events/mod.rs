//! Event handling for SpreadEdge.
//!
//! Terminal input is turned into store actions here, with bindings taken
//! from the configuration and routing decided by the current route and tab.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};

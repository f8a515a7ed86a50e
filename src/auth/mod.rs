//! Session handling: the token pair and the calls that create, refresh and
//! drop it.

mod client;
mod store;

pub use client::{AuthClient, Registration, TokenResponse};
pub use store::{ACCESS_TOKEN_KEY, FileTokenStore, MemoryTokenStore, REFRESH_TOKEN_KEY, TokenStore};

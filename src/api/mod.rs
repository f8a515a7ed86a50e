//! SpreadEdge backend integration.
//!
//! This module provides the HTTP client for the backend, the conversion of
//! its JSON payloads into state types, and the [`DataSource`] seam the
//! screens fetch through.

mod client;
mod converter;
mod source;

pub use client::ApiClient;
pub use converter::DataConverter;
pub use source::{DataSource, LiveDataSource, PlaceholderDataSource, placeholder_strategies};

#[cfg(test)]
pub use source::MockDataSource;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use std::time::Duration;

/// Build the shared HTTP client with the configured request timeout.
pub fn http_client(config: &ApiConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .user_agent(concat!("spreadedge/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Join the base URL and an absolute path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn a non-success response into [`Error::Status`].
pub(crate) async fn check_status(
    response: reqwest::Response,
    path: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, path, body = %body, "Backend rejected request");
        Err(Error::status(status, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        assert_eq!(
            endpoint("http://localhost:8000/", "/signals"),
            "http://localhost:8000/signals"
        );
        assert_eq!(
            endpoint("http://h", "copy-trade/toggle"),
            "http://h/copy-trade/toggle"
        );
    }
}

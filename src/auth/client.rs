//! Authentication client.

use super::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStore};
use crate::api::{check_status, endpoint};
use crate::error::Result;
use crate::navigation::SessionCheck;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Response of the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: Option<String>,
}

/// Account registration request.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

/// Logs in, keeps the token pair in a [`TokenStore`], and refreshes it on demand.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl AuthClient {
    /// Create a client for `base_url` persisting tokens in `store`.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            store,
        }
    }

    /// Exchange credentials for a token pair and persist it.
    ///
    /// Transport and HTTP failures are returned as-is; nothing is retried.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "/token"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        let tokens: TokenResponse = check_status(response, "/token").await?.json().await?;

        if !tokens.access_token.is_empty() {
            self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
            match &tokens.refresh_token {
                Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh)?,
                None => self.store.remove(REFRESH_TOKEN_KEY)?,
            }
            info!(email, "Logged in");
        }

        Ok(tokens)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> Result<String> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "/auth/register"))
            .json(registration)
            .send()
            .await?;
        let body: MessageResponse = check_status(response, "/auth/register")
            .await?
            .json()
            .await?;
        info!(email = %registration.email, "Registered account");
        Ok(body.message)
    }

    /// Delete both stored tokens. Never fails from the caller's point of view.
    pub fn logout(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to delete stored token");
            }
        }
        info!("Logged out");
    }

    /// The stored access token, if any.
    pub fn current_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read access token");
                None
            }
        }
    }

    /// Obtain a new access token using the stored refresh token.
    ///
    /// Returns `None` without touching the network when no refresh token is
    /// stored. A failed refresh call logs the user out; a successful one that
    /// carries no access token leaves both stored tokens in place.
    pub async fn refresh_token(&self) -> Option<String> {
        let refresh = match self.store.get(REFRESH_TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No refresh token stored");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read refresh token");
                return None;
            }
        };

        match self.request_refresh(&refresh).await {
            Ok(Some(access)) => {
                info!("Access token refreshed");
                Some(access)
            }
            Ok(None) => {
                warn!("Refresh response carried no access token");
                None
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, ending session");
                self.logout();
                None
            }
        }
    }

    async fn request_refresh(&self, refresh: &str) -> Result<Option<String>> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "/refresh-token"))
            .bearer_auth(refresh)
            .send()
            .await?;
        let body: RefreshResponse = check_status(response, "/refresh-token")
            .await?
            .json()
            .await?;

        let Some(access) = body.access_token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        self.store.set(ACCESS_TOKEN_KEY, &access)?;
        Ok(Some(access))
    }

    /// True iff an access token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }
}

impl SessionCheck for AuthClient {
    fn has_session(&self) -> bool {
        self.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::error::Error;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    fn client(base_url: &str) -> (AuthClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let auth = AuthClient::new(reqwest::Client::new(), base_url, store.clone());
        (auth, store)
    }

    fn logged_in(server: &mockito::Server) -> (AuthClient, Arc<MemoryTokenStore>) {
        let (auth, store) = client(&server.url());
        store.set(ACCESS_TOKEN_KEY, "A").unwrap();
        store.set(REFRESH_TOKEN_KEY, "R").unwrap();
        (auth, store)
    }

    #[test]
    fn test_fresh_install_is_unauthenticated() {
        let (auth, _) = client("http://localhost:8000");
        assert!(!auth.is_authenticated());
        assert_eq!(auth.current_token(), None);
    }

    #[tokio::test]
    async fn test_login_persists_token_pair() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("username".into(), "a@b.com".into()),
                Matcher::UrlEncoded("password".into(), "pw".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"A","token_type":"bearer","refresh_token":"R"}"#)
            .create_async()
            .await;

        let (auth, store) = client(&server.url());
        let tokens = auth.login("a@b.com", "pw").await.unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.token_type, "bearer");
        assert_eq!(auth.current_token().as_deref(), Some("A"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_without_refresh_token_drops_previous_one() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"B","token_type":"bearer"}"#)
            .create_async()
            .await;

        let (auth, store) = logged_in(&server);
        auth.login("other@b.com", "pw").await.unwrap();

        assert_eq!(auth.current_token().as_deref(), Some("B"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_rejection_propagates_and_stores_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(401)
            .with_body(r#"{"detail":"Incorrect username or password"}"#)
            .create_async()
            .await;

        let (auth, _) = client(&server.url());
        let err = auth.login("a@b.com", "wrong").await.unwrap_err();

        assert!(matches!(err, Error::Status { status: 401, .. }));
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_both_tokens() {
        let server = mockito::Server::new_async().await;
        let (auth, store) = logged_in(&server);

        auth.logout();

        assert!(!auth.is_authenticated());
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_without_token_skips_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/refresh-token")
            .expect(0)
            .create_async()
            .await;

        let (auth, _) = client(&server.url());
        assert_eq!(auth.refresh_token().await, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_success_replaces_access_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/refresh-token")
            .match_header("authorization", "Bearer R")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"A2","token_type":"bearer"}"#)
            .create_async()
            .await;

        let (auth, store) = logged_in(&server);
        assert_eq!(auth.refresh_token().await.as_deref(), Some("A2"));

        mock.assert_async().await;
        assert_eq!(auth.current_token().as_deref(), Some("A2"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
    }

    #[tokio::test]
    async fn test_refresh_failure_forces_logout() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/refresh-token")
            .with_status(401)
            .create_async()
            .await;

        let (auth, store) = logged_in(&server);
        assert_eq!(auth.refresh_token().await, None);

        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_without_access_token_in_body_keeps_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/refresh-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token_type":"bearer"}"#)
            .create_async()
            .await;

        let (auth, store) = logged_in(&server);
        assert_eq!(auth.refresh_token().await, None);
        assert_eq!(auth.current_token().as_deref(), Some("A"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
    }

    #[tokio::test]
    async fn test_register_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/register")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "new@b.com",
                "password": "pw",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"User registered successfully"}"#)
            .create_async()
            .await;

        let (auth, _) = client(&server.url());
        let message = auth
            .register(&Registration {
                email: "new@b.com".into(),
                password: "pw".into(),
                full_name: None,
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(message, "User registered successfully");
        assert!(!auth.is_authenticated());
    }
}

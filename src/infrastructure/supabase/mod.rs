// SPDX-License-Identifier: MPL-2.0
//! Supabase adapter.
//!
//! Talks to the three hosted services over HTTPS:
//! - `auth/v1` - sign-up, password sign-in, logout, OAuth authorize URL
//! - `rest/v1` - row queries, exact counts, inserts, updates, deletes
//! - `storage/v1` - avatar uploads and public object URLs
//!
//! Every request carries the project's anon key in `apikey`, and a bearer
//! token that is the signed-in user's access token when a session is
//! installed, or the anon key otherwise.

mod auth;
mod rest;
mod storage;

use crate::application::port::BackendFuture;
use crate::domain::error::BackendError;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for a Supabase project.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.has_user_token())
            .finish_non_exhaustive()
    }
}

/// Snapshot of everything a request needs, moved into the request future.
#[derive(Clone)]
struct Endpoint {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    bearer: String,
}

impl SupabaseClient {
    /// Creates a client for the project at `url`.
    ///
    /// An empty `url` or `anon_key` yields a client whose calls all fail with
    /// [`BackendError::NotConfigured`], so the app can still start offline.
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        let http = match reqwest::Client::builder()
            .user_agent(concat!("tv3-home-hub/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!("falling back to default HTTP client: {err}");
                reqwest::Client::new()
            }
        };

        Self {
            http,
            base_url: url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.trim().to_string(),
            access_token: RwLock::new(None),
        }
    }

    /// Whether both the project URL and the anon key are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.anon_key.is_empty()
    }

    fn endpoint(&self) -> Result<Endpoint, BackendError> {
        if !self.is_configured() {
            return Err(BackendError::NotConfigured);
        }
        let bearer = self
            .access_token
            .read()
            .ok()
            .and_then(|token| token.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        Ok(Endpoint {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            anon_key: self.anon_key.clone(),
            bearer,
        })
    }

    fn has_user_token(&self) -> bool {
        self.access_token
            .read()
            .map(|token| token.is_some())
            .unwrap_or(false)
    }
}

impl Endpoint {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer)
    }
}

/// Sends a request and turns non-success statuses into [`BackendError::Status`].
async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
    let response = request
        .send()
        .await
        .map_err(|err| BackendError::Network(err.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status.canonical_reason());
    tracing::debug!(status = status.as_u16(), %message, "backend call rejected");
    Err(BackendError::status(status.as_u16(), message))
}

/// Reads a JSON body.
async fn json_body(response: Response) -> Result<Value, BackendError> {
    response
        .json::<Value>()
        .await
        .map_err(|err| BackendError::Decode(err.to_string()))
}

/// Extracts the human-readable message from an error body.
///
/// The services disagree on the field name: auth uses `msg` or
/// `error_description`, rest and storage use `message`.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    reason.unwrap_or("Request failed").to_string()
}

/// Parses the total out of a `Content-Range` header (`0-24/573`, `*/0`).
fn content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

/// A future that fails immediately.
fn fail<T: Send + 'static>(err: BackendError) -> BackendFuture<T> {
    Box::pin(futures_util::future::ready(Err(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{AuthService, ObjectStore, Query, RowStore};
    use crate::domain::auth::{AuthUser, OAuthProvider, Session};

    fn session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: None,
            user: AuthUser {
                id: "u1".into(),
                email: None,
            },
        }
    }

    #[test]
    fn error_message_prefers_known_fields() {
        assert_eq!(
            error_message(r#"{"msg":"User already registered"}"#, Some("Bad Request")),
            "User already registered"
        );
        assert_eq!(
            error_message(
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
                None
            ),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message(r#"{"code":"23505","message":"duplicate key"}"#, None),
            "duplicate key"
        );
    }

    #[test]
    fn error_message_falls_back_to_reason() {
        assert_eq!(error_message("<html>", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message("", None), "Request failed");
    }

    #[test]
    fn content_range_total_is_parsed() {
        assert_eq!(content_range_total("0-24/573"), Some(573));
        assert_eq!(content_range_total("*/0"), Some(0));
        assert_eq!(content_range_total("0-24/*"), None);
        assert_eq!(content_range_total("garbage"), None);
    }

    #[test]
    fn base_url_is_normalised() {
        let client = SupabaseClient::new(" https://demo.supabase.co/ ", "key");
        assert_eq!(
            client.public_url("avatars", "u1/avatar.png"),
            "https://demo.supabase.co/storage/v1/object/public/avatars/u1/avatar.png"
        );
    }

    #[test]
    fn oauth_url_names_provider() {
        let client = SupabaseClient::new("https://demo.supabase.co", "key");
        assert_eq!(
            client.oauth_url(OAuthProvider::Apple).expect("configured"),
            "https://demo.supabase.co/auth/v1/authorize?provider=apple"
        );
    }

    #[test]
    fn bearer_follows_installed_session() {
        let client = SupabaseClient::new("https://demo.supabase.co", "anon");
        assert_eq!(client.endpoint().expect("configured").bearer, "anon");

        client.set_session(Some(&session("user-token")));
        assert_eq!(client.endpoint().expect("configured").bearer, "user-token");

        client.set_session(None);
        assert_eq!(client.endpoint().expect("configured").bearer, "anon");
    }

    #[tokio::test]
    async fn unconfigured_client_fails_without_network() {
        let client = SupabaseClient::new("", "");
        assert!(!client.is_configured());
        assert_eq!(
            client.select("shorts", Query::new()).await,
            Err(BackendError::NotConfigured)
        );
        assert_eq!(
            client.sign_in("a@tv3news.app", "secret1").await,
            Err(BackendError::NotConfigured)
        );
        assert_eq!(
            client.oauth_url(OAuthProvider::Google),
            Err(BackendError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn sign_out_without_session_is_a_no_op() {
        let client = SupabaseClient::new("https://demo.supabase.co", "anon");
        assert_eq!(client.sign_out().await, Ok(()));
    }
}

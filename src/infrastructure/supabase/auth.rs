// SPDX-License-Identifier: MPL-2.0
//! Auth service (`/auth/v1`).

use super::{fail, json_body, send, SupabaseClient};
use crate::application::port::{AuthService, BackendFuture};
use crate::domain::auth::{OAuthProvider, Session};
use crate::domain::error::BackendError;
use reqwest::Method;
use serde_json::{json, Value};

impl AuthService for SupabaseClient {
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> BackendFuture<Option<Session>> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let body = json!({
            "email": email,
            "password": password,
            "data": { "username": username },
        });

        Box::pin(async move {
            tracing::debug!("auth: sign-up");
            let response = send(
                endpoint
                    .request(Method::POST, "/auth/v1/signup")
                    .json(&body),
            )
            .await?;
            let value = json_body(response).await?;
            session_from_signup(value)
        })
    }

    fn sign_in(&self, email: &str, password: &str) -> BackendFuture<Session> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let body = json!({ "email": email, "password": password });

        Box::pin(async move {
            tracing::debug!("auth: password sign-in");
            let response = send(
                endpoint
                    .request(Method::POST, "/auth/v1/token?grant_type=password")
                    .json(&body),
            )
            .await?;
            let value = json_body(response).await?;
            serde_json::from_value(value).map_err(|err| BackendError::Decode(err.to_string()))
        })
    }

    fn sign_out(&self) -> BackendFuture<()> {
        if !self.has_user_token() {
            return Box::pin(futures_util::future::ready(Ok(())));
        }
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };

        Box::pin(async move {
            tracing::debug!("auth: logout");
            send(endpoint.request(Method::POST, "/auth/v1/logout")).await?;
            Ok(())
        })
    }

    fn oauth_url(&self, provider: OAuthProvider) -> Result<String, BackendError> {
        let endpoint = self.endpoint()?;
        Ok(endpoint.url(&format!(
            "/auth/v1/authorize?provider={}",
            provider.as_str()
        )))
    }

    fn set_session(&self, session: Option<&Session>) {
        match self.access_token.write() {
            Ok(mut token) => *token = session.map(|s| s.access_token.clone()),
            Err(err) => tracing::warn!("session token lock poisoned: {err}"),
        }
    }
}

/// Sign-up answers with a full session when confirmation is disabled, or with
/// the bare user record when an e-mail confirmation is pending.
fn session_from_signup(value: Value) -> Result<Option<Session>, BackendError> {
    if value.get("access_token").is_none() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| BackendError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_with_session_is_decoded() {
        let value = json!({
            "access_token": "at",
            "refresh_token": "rt",
            "user": { "id": "u1", "email": "jane@tv3news.app" }
        });
        let session = session_from_signup(value)
            .expect("decodes")
            .expect("has session");
        assert_eq!(session.user.id, "u1");
    }

    #[test]
    fn signup_pending_confirmation_has_no_session() {
        let value = json!({ "id": "u1", "email": "jane@tv3news.app" });
        assert_eq!(session_from_signup(value), Ok(None));
    }

    #[test]
    fn malformed_session_is_a_decode_error() {
        let value = json!({ "access_token": 42 });
        assert!(matches!(
            session_from_signup(value),
            Err(BackendError::Decode(_))
        ));
    }
}

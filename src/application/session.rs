// SPDX-License-Identifier: MPL-2.0
//! Session context and account flows.
//!
//! [`SessionContext`] is owned by the root application state and passed to
//! whoever needs the current user; there is no global session. The async
//! flows below take a [`SharedBackend`] by value so they can run inside
//! `iced::Task::perform`, and report back through messages.
//!
//! Each flow is a single attempt: no token refresh, no retry, no queue.

use crate::application::port::{BackendFuture, Query, SharedBackend};
use crate::domain::auth::{AuthUser, CredentialError, Credentials, OAuthProvider, Session};
use crate::domain::content::{avatar_object_path, tables, Profile, AVATAR_BUCKET};
use crate::domain::error::BackendError;
use crate::error::{Error, Result};
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// SessionContext
// =============================================================================

/// Current user, their profile, and the backend they are signed in to.
pub struct SessionContext {
    backend: SharedBackend,
    session: Option<Session>,
    profile: Option<Profile>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.session)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates the context, restoring a previously persisted session.
    ///
    /// The restored session is installed on the backend right away; the
    /// profile is unknown until [`fetch_profile`] completes.
    pub fn init(backend: SharedBackend, restored: Option<Session>) -> Self {
        backend.set_session(restored.as_ref());
        if let Some(session) = &restored {
            tracing::info!(user = %session.user.id, "restored session");
        }
        Self {
            backend,
            session: restored,
            profile: None,
        }
    }

    /// Handle to the backend, for spawning tasks.
    #[must_use]
    pub fn backend(&self) -> SharedBackend {
        Arc::clone(&self.backend)
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }

    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Switches to a freshly obtained session.
    pub fn establish(&mut self, session: Session) {
        tracing::info!(user = %session.user.id, "signed in");
        self.backend.set_session(Some(&session));
        self.profile = None;
        self.session = Some(session);
    }

    /// Stores a fetched profile if it still belongs to the current user.
    ///
    /// Returns `false` when the profile arrived for a user who has since
    /// signed out or been replaced.
    pub fn set_profile(&mut self, user_id: &str, profile: Option<Profile>) -> bool {
        if self.user_id() != Some(user_id) {
            return false;
        }
        self.profile = profile;
        true
    }

    /// Signs out locally and returns the server-side logout call.
    ///
    /// The logout future is built before the token is dropped so it is still
    /// authorised as the departing user.
    pub fn teardown(&mut self) -> BackendFuture<()> {
        let logout = self.backend.sign_out();
        if let Some(session) = self.session.take() {
            tracing::info!(user = %session.user.id, "signed out");
        }
        self.profile = None;
        self.backend.set_session(None);
        logout
    }
}

// =============================================================================
// Auth flows
// =============================================================================

/// Why an auth flow failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Local validation failed; no request was made.
    Invalid(CredentialError),
    /// Sign-in rejected. The backend's reason is deliberately not exposed.
    InvalidCredentials,
    /// Sign-up rejected; carries the backend's message verbatim.
    Rejected(String),
}

impl AuthError {
    /// i18n key for the message, or `None` when the text is [`Self::detail`].
    #[must_use]
    pub fn i18n_key(&self) -> Option<&'static str> {
        match self {
            AuthError::Invalid(err) => Some(err.i18n_key()),
            AuthError::InvalidCredentials => Some("auth-error-invalid-credentials"),
            AuthError::Rejected(_) => None,
        }
    }

    /// Untranslated backend text, for [`AuthError::Rejected`].
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuthError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Invalid(err) => write!(f, "{err}"),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::Rejected(message) => write!(f, "{message}"),
        }
    }
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        AuthError::Invalid(err)
    }
}

/// Password sign-in with the derived e-mail.
///
/// # Errors
///
/// Any backend failure becomes [`AuthError::InvalidCredentials`].
pub async fn sign_in(
    backend: SharedBackend,
    credentials: Credentials,
) -> std::result::Result<Session, AuthError> {
    backend
        .sign_in(&credentials.email(), credentials.password())
        .await
        .map_err(|err| {
            tracing::info!("sign-in rejected: {err}");
            AuthError::InvalidCredentials
        })
}

/// Creates an account with the derived e-mail, storing the username as
/// user metadata.
///
/// Returns `None` when the account exists but no session was issued yet.
///
/// # Errors
///
/// Backend failures become [`AuthError::Rejected`] with the backend text.
pub async fn sign_up(
    backend: SharedBackend,
    credentials: Credentials,
) -> std::result::Result<Option<Session>, AuthError> {
    backend
        .sign_up(
            &credentials.email(),
            credentials.password(),
            credentials.username(),
        )
        .await
        .map_err(|err| {
            tracing::info!("sign-up rejected: {err}");
            AuthError::Rejected(err.message())
        })
}

/// URL that starts an external provider sign-in.
///
/// # Errors
///
/// Fails when the backend is not configured.
pub fn oauth_url(
    backend: &SharedBackend,
    provider: OAuthProvider,
) -> std::result::Result<String, BackendError> {
    backend.oauth_url(provider)
}

// =============================================================================
// Profile flows
// =============================================================================

/// Fetches a user's profile row, if any.
///
/// # Errors
///
/// Returns the backend error, or [`BackendError::Decode`] for a malformed row.
pub async fn fetch_profile(
    backend: SharedBackend,
    user_id: String,
) -> std::result::Result<Option<Profile>, BackendError> {
    let rows = backend
        .select(tables::PROFILES, Query::new().eq("user_id", user_id))
        .await?;
    rows.into_iter()
        .next()
        .map(|row| serde_json::from_value(row).map_err(|err| BackendError::Decode(err.to_string())))
        .transpose()
}

/// Returns the user's profile, creating it from `username` when missing.
///
/// # Errors
///
/// Returns the first backend error encountered.
pub async fn ensure_profile(
    backend: SharedBackend,
    user_id: String,
    username: String,
) -> std::result::Result<Profile, BackendError> {
    if let Some(profile) = fetch_profile(Arc::clone(&backend), user_id.clone()).await? {
        return Ok(profile);
    }
    let row = backend
        .insert(
            tables::PROFILES,
            json!({ "user_id": user_id, "username": username }),
        )
        .await?;
    serde_json::from_value(row).map_err(|err| BackendError::Decode(err.to_string()))
}

/// Points the user's profile at `avatar_url`.
///
/// # Errors
///
/// Returns the backend error.
pub async fn set_avatar(
    backend: SharedBackend,
    user_id: String,
    avatar_url: String,
) -> std::result::Result<(), BackendError> {
    backend
        .update(
            tables::PROFILES,
            json!({ "avatar_url": avatar_url }),
            Query::new().eq("user_id", user_id),
        )
        .await
}

/// Uploads an image file as the user's avatar and stores its public URL on
/// the profile. Returns the URL.
///
/// # Errors
///
/// Fails on unreadable files and on any backend error.
pub async fn upload_avatar(backend: SharedBackend, user_id: String, file: PathBuf) -> Result<String> {
    let bytes = tokio::fs::read(&file).await?;
    let extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "png".to_string());
    let object_path = avatar_object_path(&user_id, &extension);

    backend
        .upload(
            AVATAR_BUCKET,
            &object_path,
            bytes,
            image_content_type(&extension),
        )
        .await
        .map_err(Error::from)?;

    let url = backend.public_url(AVATAR_BUCKET, &object_path);
    set_avatar(backend, user_id, url.clone())
        .await
        .map_err(Error::from)?;
    Ok(url)
}

/// MIME type for an image file extension.
#[must_use]
pub fn image_content_type(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::derive_email;
    use crate::test_utils::FakeBackend;

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials::new(username, password).expect("valid credentials")
    }

    #[tokio::test]
    async fn sign_in_masks_backend_reason() {
        let fake = FakeBackend::new().with_user("jane", "secret1").shared();
        let err = sign_in(fake.clone(), creds("jane", "wrong12"))
            .await
            .expect_err("rejected");
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn sign_in_uses_derived_email() {
        let fake = FakeBackend::new().with_user("Jane Doe", "secret1").shared();
        let session = sign_in(fake.clone(), creds("JANE DOE", "secret1"))
            .await
            .expect("signed in");
        assert_eq!(session.user.email.as_deref(), Some("janedoe@tv3news.app"));
    }

    #[tokio::test]
    async fn sign_up_passes_backend_message_through() {
        let fake = FakeBackend::new().with_user("jane", "secret1").shared();
        let err = sign_up(fake.clone(), creds("jane", "other12"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, AuthError::Rejected("User already registered".into()));
        assert_eq!(err.i18n_key(), None);
        assert_eq!(err.detail(), Some("User already registered"));
    }

    #[tokio::test]
    async fn ensure_profile_creates_missing_row_once() {
        let fake = FakeBackend::new().shared();
        let session = sign_up(fake.clone(), creds("jane", "secret1"))
            .await
            .expect("created")
            .expect("session issued");

        let first = ensure_profile(fake.clone(), session.user.id.clone(), "jane".into())
            .await
            .expect("profile");
        let second = ensure_profile(fake.clone(), session.user.id.clone(), "jane".into())
            .await
            .expect("profile");

        assert_eq!(first.username, "jane");
        assert_eq!(first.user_id, second.user_id);
        assert_eq!(fake.rows(tables::PROFILES).len(), 1);
    }

    #[tokio::test]
    async fn teardown_clears_session_and_backend_token() {
        let fake = FakeBackend::new().with_user("jane", "secret1").shared();
        let session = sign_in(fake.clone(), creds("jane", "secret1"))
            .await
            .expect("signed in");

        let mut ctx = SessionContext::init(fake.clone(), None);
        ctx.establish(session);
        assert!(ctx.is_signed_in());
        assert!(fake.current_user_id().is_some());

        ctx.teardown().await.expect("logout");
        assert!(!ctx.is_signed_in());
        assert!(ctx.profile().is_none());
        assert!(fake.current_user_id().is_none());
    }

    #[test]
    fn stale_profile_is_ignored() {
        let fake = FakeBackend::new().shared();
        let mut ctx = SessionContext::init(fake, None);
        let profile = Profile {
            id: None,
            user_id: "u1".into(),
            username: "jane".into(),
            avatar_url: None,
            created_at: None,
            updated_at: None,
        };
        assert!(!ctx.set_profile("u1", Some(profile)));
        assert!(ctx.profile().is_none());
    }

    #[tokio::test]
    async fn avatar_upload_stores_public_url_on_profile() {
        let fake = FakeBackend::new().shared();
        let session = sign_up(fake.clone(), creds("jane", "secret1"))
            .await
            .expect("created")
            .expect("session issued");
        let user_id = session.user.id.clone();
        ensure_profile(fake.clone(), user_id.clone(), "jane".into())
            .await
            .expect("profile");

        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("me.JPG");
        std::fs::write(&file, [0xFF, 0xD8, 0xFF]).expect("write");

        let url = upload_avatar(fake.clone(), user_id.clone(), file)
            .await
            .expect("uploaded");
        assert!(url.ends_with(&format!("avatars/{user_id}/avatar.jpg")));

        let profile = fetch_profile(fake.clone(), user_id)
            .await
            .expect("fetched")
            .expect("exists");
        assert_eq!(profile.avatar_url.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn avatar_upload_reports_missing_file() {
        let fake = FakeBackend::new().shared();
        let result = upload_avatar(fake, "u1".into(), PathBuf::from("/no/such/file.png")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn derived_email_matches_sign_in_email() {
        assert_eq!(creds("Jane Doe", "secret1").email(), derive_email("jane doe"));
    }

    #[test]
    fn image_content_types() {
        assert_eq!(image_content_type("jpeg"), "image/jpeg");
        assert_eq!(image_content_type("png"), "image/png");
        assert_eq!(image_content_type("unknown"), "image/png");
    }
}

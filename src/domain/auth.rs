// SPDX-License-Identifier: MPL-2.0
//! Authentication value objects.
//!
//! Users pick a username; the backend only knows e-mail addresses, so the
//! login e-mail is derived from the username with a fixed domain suffix.
//! Passwords are bounded to a short length window and validated locally
//! before any network call is made.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Password length bounds, counted in characters.
pub mod password_bounds {
    /// Shortest accepted password.
    pub const MIN: usize = 6;
    /// Longest accepted password (also the input cap in the form).
    pub const MAX: usize = 8;
}

/// Domain appended to usernames to build the login e-mail.
pub const EMAIL_DOMAIN: &str = "tv3news.app";

/// Derives the login e-mail for a username.
///
/// The username is lower-cased and every whitespace character is removed,
/// so `"Jane Doe"` becomes `"janedoe@tv3news.app"`.
#[must_use]
pub fn derive_email(username: &str) -> String {
    let local: String = username
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("{local}@{EMAIL_DOMAIN}")
}

/// Local validation failure of the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// Username or password left empty.
    EmptyFields,
    /// Password longer than [`password_bounds::MAX`].
    PasswordTooLong,
    /// Password shorter than [`password_bounds::MIN`].
    PasswordTooShort,
}

impl CredentialError {
    /// Returns the i18n message key shown inline in the form.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            CredentialError::EmptyFields => "auth-error-empty-fields",
            CredentialError::PasswordTooLong => "auth-error-password-too-long",
            CredentialError::PasswordTooShort => "auth-error-password-too-short",
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::EmptyFields => write!(f, "Please fill in all fields"),
            CredentialError::PasswordTooLong => write!(
                f,
                "Password must not exceed {} characters",
                password_bounds::MAX
            ),
            CredentialError::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                password_bounds::MIN
            ),
        }
    }
}

/// Username and password that passed local validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Validates raw form input.
    ///
    /// Checks run in order: empty fields, then too long, then too short.
    ///
    /// # Errors
    ///
    /// Returns the first [`CredentialError`] that applies.
    pub fn new(username: &str, password: &str) -> Result<Self, CredentialError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(CredentialError::EmptyFields);
        }
        let len = password.chars().count();
        if len > password_bounds::MAX {
            return Err(CredentialError::PasswordTooLong);
        }
        if len < password_bounds::MIN {
            return Err(CredentialError::PasswordTooShort);
        }
        Ok(Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        })
    }

    /// The username as typed (outer whitespace trimmed).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The derived login e-mail.
    #[must_use]
    pub fn email(&self) -> String {
        derive_email(&self.username)
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Caps typed password input at the maximum length.
#[must_use]
pub fn cap_password_input(input: &str) -> String {
    input.chars().take(password_bounds::MAX).collect()
}

/// Authenticated user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Active session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// External identity providers offered by the auth sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Apple,
}

impl OAuthProvider {
    /// Provider identifier understood by the auth service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Apple => "apple",
        }
    }
}

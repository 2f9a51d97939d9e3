// SPDX-License-Identifier: MPL-2.0
//! Errors reported by the hosted backend (auth, rows, object storage).

use std::fmt;

/// Failure of a single backend call.
///
/// Every backend operation is attempted exactly once; callers decide whether
/// a failure is surfaced, swallowed, or reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No backend URL or anon key configured.
    NotConfigured,

    /// The call requires a signed-in session and none is active.
    Unauthenticated,

    /// Transport failure (DNS, TLS, connection reset, timeout).
    Network(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the human-readable text extracted from the response body
    /// (`msg`, `message` or `error_description`), or the status reason.
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    Decode(String),
}

impl BackendError {
    /// Returns the i18n message key used when this error reaches a toast.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            BackendError::NotConfigured => "error-backend-not-configured",
            BackendError::Unauthenticated => "error-backend-unauthenticated",
            BackendError::Network(_) => "error-backend-network",
            BackendError::Status { .. } => "error-backend-rejected",
            BackendError::Decode(_) => "error-backend-decode",
        }
    }

    /// Returns the raw message carried by the error, suitable for showing
    /// verbatim (sign-up failures are displayed this way).
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            BackendError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Convenience constructor for status errors.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        BackendError::Status {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotConfigured => write!(f, "Backend is not configured"),
            BackendError::Unauthenticated => write!(f, "Not signed in"),
            BackendError::Network(msg) => write!(f, "Network error: {msg}"),
            BackendError::Status { status, message } => write!(f, "{message} ({status})"),
            BackendError::Decode(msg) => write!(f, "Unexpected response: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_is_passed_through_verbatim() {
        let err = BackendError::status(422, "User already registered");
        assert_eq!(err.message(), "User already registered");
    }

    #[test]
    fn display_includes_status_code() {
        let err = BackendError::status(400, "Invalid login credentials");
        assert_eq!(err.to_string(), "Invalid login credentials (400)");
    }

    #[test]
    fn i18n_keys_are_distinct() {
        let keys = [
            BackendError::NotConfigured.i18n_key(),
            BackendError::Unauthenticated.i18n_key(),
            BackendError::Network(String::new()).i18n_key(),
            BackendError::status(500, "").i18n_key(),
            BackendError::Decode(String::new()).i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

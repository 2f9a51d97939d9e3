// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::BackendError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Backend(BackendError),
}

impl Error {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Backend(err) => err.i18n_key(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Backend(e) => write!(f, "Backend Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        Error::Backend(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn backend_error_keeps_its_i18n_key() {
        let err: Error = BackendError::NotConfigured.into();
        assert_eq!(err.i18n_key(), "error-backend-not-configured");
        assert!(format!("{}", err).starts_with("Backend Error: "));
    }

    #[test]
    fn toml_parse_error_is_a_config_error() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("not = [valid");
        let err: Error = parsed.expect_err("invalid toml").into();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.i18n_key(), "error-config");
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Backend port definitions.
//!
//! Rows travel as `serde_json::Value` so the port stays independent of the
//! table set; the application layer decodes them into domain records.

use crate::domain::auth::{OAuthProvider, Session};
use crate::domain::error::BackendError;
use futures_util::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Future returned by every backend call.
pub type BackendFuture<T> = BoxFuture<'static, Result<T, BackendError>>;

/// Backend handle shared by the app and its tasks.
pub type SharedBackend = Arc<dyn Backend>;

// =============================================================================
// Query
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

/// Row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// `column` is one of `values`
    In { column: String, values: Vec<String> },
}

impl Filter {
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } => column,
        }
    }

    /// Whether a row field value satisfies this filter.
    #[must_use]
    pub fn accepts(&self, field: &str) -> bool {
        match self {
            Filter::Eq { value, .. } => value == field,
            Filter::In { values, .. } => values.iter().any(|v| v == field),
        }
    }
}

/// Row selection: projected columns, filters and ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    columns: Option<String>,
    filters: Vec<Filter>,
    order: Option<(String, Order)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the returned columns (comma separated). Defaults to `*`.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = Some(columns.to_string());
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn is_in<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    #[must_use]
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_string(), order));
        self
    }

    #[must_use]
    pub fn columns(&self) -> &str {
        self.columns.as_deref().unwrap_or("*")
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub fn ordering(&self) -> Option<(&str, Order)> {
        self.order.as_ref().map(|(c, o)| (c.as_str(), *o))
    }

    /// Encodes the query as REST query-string pairs
    /// (`select=*`, `short_id=eq.x`, `user_id=in.("a","b")`, `order=created_at.desc`).
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns().to_string())];
        for filter in &self.filters {
            let value = match filter {
                Filter::Eq { value, .. } => format!("eq.{value}"),
                Filter::In { values, .. } => {
                    let quoted: Vec<String> = values
                        .iter()
                        .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
                        .collect();
                    format!("in.({})", quoted.join(","))
                }
            };
            params.push((filter.column().to_string(), value));
        }
        if let Some((column, order)) = &self.order {
            let dir = match order {
                Order::Asc => "asc",
                Order::Desc => "desc",
            };
            params.push(("order".to_string(), format!("{column}.{dir}")));
        }
        params
    }
}

// =============================================================================
// Ports
// =============================================================================

/// Port for the hosted auth service.
///
/// The adapter keeps the current access token so that row and object calls
/// are authorised as the signed-in user, the way the hosted SDK does.
pub trait AuthService: Send + Sync {
    /// Registers a user with `username` stored as user metadata.
    ///
    /// Returns `None` when the account was created but no session was issued
    /// (e-mail confirmation pending).
    fn sign_up(&self, email: &str, password: &str, username: &str)
        -> BackendFuture<Option<Session>>;

    /// Password sign-in.
    fn sign_in(&self, email: &str, password: &str) -> BackendFuture<Session>;

    /// Revokes the current session on the server side.
    fn sign_out(&self) -> BackendFuture<()>;

    /// URL that starts the provider's browser sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotConfigured`] when no backend URL is set.
    fn oauth_url(&self, provider: OAuthProvider) -> Result<String, BackendError>;

    /// Installs (or clears) the session used to authorise later calls.
    fn set_session(&self, session: Option<&Session>);
}

/// Port for row storage.
pub trait RowStore: Send + Sync {
    fn select(&self, table: &str, query: Query) -> BackendFuture<Vec<Value>>;

    /// Exact number of rows matching `query`, without fetching them.
    fn count(&self, table: &str, query: Query) -> BackendFuture<u64>;

    /// Inserts one row and returns it as stored (ids and timestamps filled).
    fn insert(&self, table: &str, row: Value) -> BackendFuture<Value>;

    /// Applies `patch` to every row matching `query`.
    fn update(&self, table: &str, patch: Value, query: Query) -> BackendFuture<()>;

    /// Deletes every row matching `query`.
    fn delete(&self, table: &str, query: Query) -> BackendFuture<()>;
}

/// Port for object storage.
pub trait ObjectStore: Send + Sync {
    /// Uploads `bytes`, replacing any existing object at `path`.
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendFuture<()>;

    /// Public URL of an object in a public bucket.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Downloads a publicly readable file (avatar, channel logo) by URL.
    fn download(&self, url: &str) -> BackendFuture<Vec<u8>>;
}

/// Everything the app needs from the backend.
pub trait Backend: AuthService + RowStore + ObjectStore {}

impl<T> Backend for T where T: AuthService + RowStore + ObjectStore {}

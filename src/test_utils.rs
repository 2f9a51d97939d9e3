// SPDX-License-Identifier: MPL-2.0
//! Test utilities: an in-memory backend implementing every port.
//!
//! [`FakeBackend`] keeps rows per table in memory, answers filters and
//! ordering the way the hosted REST service does, records each call as
//! `"<operation>:<table>"` (or just `"<operation>"` for auth calls), and can be
//! told to fail any of those operations.

use crate::application::port::{AuthService, BackendFuture, ObjectStore, Order, Query, RowStore};
use crate::domain::auth::{derive_email, AuthUser, OAuthProvider, Session};
use crate::domain::error::BackendError;
use chrono::{TimeZone, Utc};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

const FAKE_URL: &str = "https://fake.local";

#[derive(Debug, Clone)]
struct FakeUser {
    id: String,
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct FakeState {
    tables: HashMap<String, Vec<Value>>,
    users: Vec<FakeUser>,
    current: Option<Session>,
    failing: HashSet<String>,
    calls: Vec<String>,
    uploads: Vec<(String, String, usize)>,
    next_id: u64,
}

impl FakeState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Records the call and returns the injected failure, if any.
    fn enter(&mut self, op: String) -> Result<(), BackendError> {
        let failing = self.failing.contains(&op);
        self.calls.push(op);
        if failing {
            Err(BackendError::status(500, "injected failure"))
        } else {
            Ok(())
        }
    }
}

/// In-memory stand-in for the hosted backend.
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

fn ready<T: Send + 'static>(result: Result<T, BackendError>) -> BackendFuture<T> {
    Box::pin(futures_util::future::ready(result))
}

fn field_text(row: &Value, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters().iter().all(|filter| {
        field_text(row, filter.column()).is_some_and(|value| filter.accepts(&value))
    })
}

fn session_for(user: &FakeUser) -> Session {
    Session {
        access_token: format!("token-{}", user.id),
        refresh_token: None,
        user: AuthUser {
            id: user.id.clone(),
            email: Some(user.email.clone()),
        },
    }
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the fake for use as a shared backend.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test poisons the lock; later assertions still want the data.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Registers an account for `username` (e-mail derived as the app does).
    #[must_use]
    pub fn with_user(self, username: &str, password: &str) -> Self {
        {
            let mut state = self.lock();
            let id = format!("user-{}", state.next_id());
            state.users.push(FakeUser {
                id,
                email: derive_email(username),
                password: password.to_string(),
            });
        }
        self
    }

    /// Seeds a row as-is.
    #[must_use]
    pub fn with_row(self, table: &str, row: Value) -> Self {
        self.lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row);
        self
    }

    /// Makes `op` fail until [`Self::recover`] is called.
    ///
    /// `op` is one of `sign_up`, `sign_in`, `sign_out`, `upload`, or
    /// `<select|count|insert|update|delete>:<table>`.
    pub fn fail(&self, op: &str) {
        self.lock().failing.insert(op.to_string());
    }

    pub fn recover(&self, op: &str) {
        self.lock().failing.remove(op);
    }

    /// Calls made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Current contents of a table.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// User whose session is installed, if any.
    #[must_use]
    pub fn current_user_id(&self) -> Option<String> {
        self.lock().current.as_ref().map(|s| s.user.id.clone())
    }

    /// Uploaded objects as `(bucket, path, size)`.
    #[must_use]
    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        self.lock().uploads.clone()
    }
}

impl AuthService for FakeBackend {
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        _username: &str,
    ) -> BackendFuture<Option<Session>> {
        let mut state = self.lock();
        if let Err(err) = state.enter("sign_up".into()) {
            return ready(Err(err));
        }
        if state.users.iter().any(|u| u.email == email) {
            return ready(Err(BackendError::status(422, "User already registered")));
        }
        let user = FakeUser {
            id: format!("user-{}", state.next_id()),
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = session_for(&user);
        state.users.push(user);
        ready(Ok(Some(session)))
    }

    fn sign_in(&self, email: &str, password: &str) -> BackendFuture<Session> {
        let mut state = self.lock();
        if let Err(err) = state.enter("sign_in".into()) {
            return ready(Err(err));
        }
        let result = state
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(session_for)
            .ok_or_else(|| BackendError::status(400, "Invalid login credentials"));
        ready(result)
    }

    fn sign_out(&self) -> BackendFuture<()> {
        let mut state = self.lock();
        let result = state.enter("sign_out".into());
        if result.is_ok() {
            state.current = None;
        }
        ready(result)
    }

    fn oauth_url(&self, provider: OAuthProvider) -> Result<String, BackendError> {
        Ok(format!(
            "{FAKE_URL}/auth/v1/authorize?provider={}",
            provider.as_str()
        ))
    }

    fn set_session(&self, session: Option<&Session>) {
        self.lock().current = session.cloned();
    }
}

impl RowStore for FakeBackend {
    fn select(&self, table: &str, query: Query) -> BackendFuture<Vec<Value>> {
        let mut state = self.lock();
        if let Err(err) = state.enter(format!("select:{table}")) {
            return ready(Err(err));
        }
        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches(row, &query)).cloned().collect())
            .unwrap_or_default();
        if let Some((column, order)) = query.ordering() {
            rows.sort_by(|a, b| field_text(a, column).cmp(&field_text(b, column)));
            if order == Order::Desc {
                rows.reverse();
            }
        }
        ready(Ok(rows))
    }

    fn count(&self, table: &str, query: Query) -> BackendFuture<u64> {
        let mut state = self.lock();
        if let Err(err) = state.enter(format!("count:{table}")) {
            return ready(Err(err));
        }
        let count = state
            .tables
            .get(table)
            .map_or(0, |rows| rows.iter().filter(|row| matches(row, &query)).count());
        ready(Ok(count as u64))
    }

    fn insert(&self, table: &str, row: Value) -> BackendFuture<Value> {
        let mut state = self.lock();
        if let Err(err) = state.enter(format!("insert:{table}")) {
            return ready(Err(err));
        }
        let Value::Object(mut fields) = row else {
            return ready(Err(BackendError::status(400, "row must be an object")));
        };
        let n = state.next_id();
        fields
            .entry("id")
            .or_insert_with(|| Value::String(format!("{table}-{n}")));
        if !fields.contains_key("created_at") {
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
            let stamp = base
                .map(|t| (t + chrono::Duration::seconds(n as i64)).to_rfc3339())
                .unwrap_or_default();
            fields.insert("created_at".into(), Value::String(stamp));
        }
        let stored = Value::Object(fields);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        ready(Ok(stored))
    }

    fn update(&self, table: &str, patch: Value, query: Query) -> BackendFuture<()> {
        let mut state = self.lock();
        if let Err(err) = state.enter(format!("update:{table}")) {
            return ready(Err(err));
        }
        let patch: Map<String, Value> = match patch {
            Value::Object(map) => map,
            _ => return ready(Err(BackendError::status(400, "patch must be an object"))),
        };
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, &query)) {
                if let Value::Object(fields) = row {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        ready(Ok(()))
    }

    fn delete(&self, table: &str, query: Query) -> BackendFuture<()> {
        let mut state = self.lock();
        if let Err(err) = state.enter(format!("delete:{table}")) {
            return ready(Err(err));
        }
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| !matches(row, &query));
        }
        ready(Ok(()))
    }
}

impl ObjectStore for FakeBackend {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> BackendFuture<()> {
        let mut state = self.lock();
        if let Err(err) = state.enter("upload".into()) {
            return ready(Err(err));
        }
        state
            .uploads
            .push((bucket.to_string(), path.to_string(), bytes.len()));
        ready(Ok(()))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{FAKE_URL}/storage/v1/object/public/{bucket}/{path}")
    }

    fn download(&self, url: &str) -> BackendFuture<Vec<u8>> {
        let mut state = self.lock();
        if let Err(err) = state.enter("download".into()) {
            return ready(Err(err));
        }
        ready(Ok(url.as_bytes().to_vec()))
    }
}

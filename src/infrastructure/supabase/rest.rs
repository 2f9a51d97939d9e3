// SPDX-License-Identifier: MPL-2.0
//! Row storage (`/rest/v1`).

use super::{content_range_total, fail, json_body, send, SupabaseClient};
use crate::application::port::{BackendFuture, Query, RowStore};
use crate::domain::error::BackendError;
use reqwest::Method;
use serde_json::Value;

fn table_path(table: &str) -> String {
    format!("/rest/v1/{table}")
}

/// Filter-only parameters, for writes.
fn filter_params(query: &Query) -> Vec<(String, String)> {
    query
        .to_params()
        .into_iter()
        .filter(|(key, _)| key != "select" && key != "order")
        .collect()
}

impl RowStore for SupabaseClient {
    fn select(&self, table: &str, query: Query) -> BackendFuture<Vec<Value>> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let path = table_path(table);

        Box::pin(async move {
            tracing::debug!(%path, "rest: select");
            let response = send(
                endpoint
                    .request(Method::GET, &path)
                    .query(&query.to_params()),
            )
            .await?;
            match json_body(response).await? {
                Value::Array(rows) => Ok(rows),
                other => Err(BackendError::Decode(format!(
                    "expected an array of rows, got {other}"
                ))),
            }
        })
    }

    fn count(&self, table: &str, query: Query) -> BackendFuture<u64> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let path = table_path(table);

        Box::pin(async move {
            tracing::debug!(%path, "rest: count");
            let response = send(
                endpoint
                    .request(Method::HEAD, &path)
                    .header("Prefer", "count=exact")
                    .query(&query.to_params()),
            )
            .await?;
            response
                .headers()
                .get(reqwest::header::CONTENT_RANGE)
                .and_then(|value| value.to_str().ok())
                .and_then(content_range_total)
                .ok_or_else(|| BackendError::Decode("missing Content-Range total".to_string()))
        })
    }

    fn insert(&self, table: &str, row: Value) -> BackendFuture<Value> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let path = table_path(table);

        Box::pin(async move {
            tracing::debug!(%path, "rest: insert");
            let response = send(
                endpoint
                    .request(Method::POST, &path)
                    .header("Prefer", "return=representation")
                    .json(&row),
            )
            .await?;
            match json_body(response).await? {
                Value::Array(mut rows) if !rows.is_empty() => Ok(rows.swap_remove(0)),
                Value::Object(map) => Ok(Value::Object(map)),
                other => Err(BackendError::Decode(format!(
                    "expected the inserted row, got {other}"
                ))),
            }
        })
    }

    fn update(&self, table: &str, patch: Value, query: Query) -> BackendFuture<()> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let path = table_path(table);

        Box::pin(async move {
            tracing::debug!(%path, "rest: update");
            send(
                endpoint
                    .request(Method::PATCH, &path)
                    .query(&filter_params(&query))
                    .json(&patch),
            )
            .await?;
            Ok(())
        })
    }

    fn delete(&self, table: &str, query: Query) -> BackendFuture<()> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let path = table_path(table);

        Box::pin(async move {
            tracing::debug!(%path, "rest: delete");
            send(
                endpoint
                    .request(Method::DELETE, &path)
                    .query(&filter_params(&query)),
            )
            .await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::Order;

    #[test]
    fn writes_only_send_filters() {
        let query = Query::new()
            .select("id")
            .eq("short_id", "s1")
            .eq("user_id", "u1")
            .order("created_at", Order::Asc);
        assert_eq!(
            filter_params(&query),
            vec![
                ("short_id".to_string(), "eq.s1".to_string()),
                ("user_id".to_string(), "eq.u1".to_string()),
            ]
        );
    }

    #[test]
    fn table_path_targets_rest_service() {
        assert_eq!(table_path("short_likes"), "/rest/v1/short_likes");
    }
}

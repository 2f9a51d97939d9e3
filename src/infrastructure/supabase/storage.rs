// SPDX-License-Identifier: MPL-2.0
//! Object storage (`/storage/v1`).

use super::{fail, send, SupabaseClient};
use crate::application::port::{BackendFuture, ObjectStore};
use crate::domain::error::BackendError;
use reqwest::Method;

impl ObjectStore for SupabaseClient {
    fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendFuture<()> {
        let endpoint = match self.endpoint() {
            Ok(endpoint) => endpoint,
            Err(err) => return fail(err),
        };
        let object_path = format!("/storage/v1/object/{bucket}/{path}");
        let content_type = content_type.to_string();

        Box::pin(async move {
            tracing::debug!(%object_path, size = bytes.len(), "storage: upload");
            send(
                endpoint
                    .request(Method::POST, &object_path)
                    .header("x-upsert", "true")
                    .header(reqwest::header::CONTENT_TYPE, content_type)
                    .body(bytes),
            )
            .await?;
            Ok(())
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.base_url
        )
    }

    // Public files need no credentials and may live outside the project.
    fn download(&self, url: &str) -> BackendFuture<Vec<u8>> {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return fail(BackendError::Decode(format!("not a downloadable URL: {url}")));
        }
        let request = self.http.get(url);
        let url = url.to_string();

        Box::pin(async move {
            tracing::debug!(%url, "storage: download");
            let response = send(request).await?;
            let bytes = response
                .bytes()
                .await
                .map_err(|err| BackendError::Network(err.to_string()))?;
            Ok(bytes.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relative_paths_are_not_downloaded() {
        let client = SupabaseClient::new("https://project.supabase.co", "anon");
        let result = client.download("/avatars/default-1.jpg").await;
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn public_url_points_at_public_bucket() {
        let client = SupabaseClient::new("https://project.supabase.co/", "anon");
        assert_eq!(
            client.public_url("avatars", "u1/avatar.png"),
            "https://project.supabase.co/storage/v1/object/public/avatars/u1/avatar.png"
        );
    }
}

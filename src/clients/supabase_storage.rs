//! Supabase Storage REST adapter for [`PhotoStore`].

use async_trait::async_trait;
use serde_json::json;

use crate::config::Config;
use crate::ports::{PhotoStore, PhotoStoreError};

const CACHE_CONTROL: &str = "max-age=3600";

pub struct SupabaseStorage {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: super::http_client(None)?,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_key.clone(),
            bucket: config.photo_bucket.clone(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }
}

async fn ensure_success(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<(), PhotoStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(PhotoStoreError::Rejected {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PhotoStore for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PhotoStoreError> {
        let response = self
            .authorized(self.http.post(self.object_url(path)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, CACHE_CONTROL)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| PhotoStoreError::Transport(e.to_string()))?;

        ensure_success("upload", response).await?;
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    async fn remove(&self, path: &str) -> Result<(), PhotoStoreError> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);
        let response = self
            .authorized(self.http.delete(url))
            .json(&json!({ "prefixes": [path] }))
            .send()
            .await
            .map_err(|e| PhotoStoreError::Transport(e.to_string()))?;

        ensure_success("remove", response).await
    }
}

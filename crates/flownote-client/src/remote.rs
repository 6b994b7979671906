//! Notes API backend over HTTP.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, warn};

use flownote_core::{defaults, Error, Note, NoteDraft, NotePatch, Result};

use crate::backend::NoteBackend;

/// API base URL baked in at build time, falling back to the local default.
pub fn default_api_url() -> &'static str {
    option_env!("FLOWNOTE_API_URL").unwrap_or(defaults::API_URL)
}

/// Backend that forwards every operation to the Notes API.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Client,
    base_url: String,
}

impl RemoteBackend {
    /// Backend for the notes collection at `base_url`
    /// (e.g. `http://localhost:3000/api/notes`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> Result<Response> {
        let start = Instant::now();
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Request(format!("{} {} failed: {}", method, url, e)))?;

        let status = response.status();
        debug!(
            subsystem = "client",
            component = "remote",
            method = %method,
            url = %url,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Notes API call"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);
            warn!(subsystem = "client", component = "remote", status = status.as_u16(), error = %message, "Notes API returned an error");
            return Err(Error::Request(format!(
                "{} {} returned {}: {}",
                method, url, status, message
            )));
        }

        Ok(response)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl NoteBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self) -> Result<Vec<Note>> {
        let response = self.send(Method::GET, &self.base_url, None).await?;
        Self::parse(response).await
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let body = serde_json::to_value(&draft)?;
        let response = self.send(Method::POST, &self.base_url, Some(body)).await?;
        Self::parse(response).await
    }

    async fn update(&self, current: &Note, patch: NotePatch) -> Result<Note> {
        let body = serde_json::to_value(&patch)?;
        let response = self
            .send(Method::PUT, &self.note_url(&current.id), Some(body))
            .await?;
        Self::parse(response).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.send(Method::DELETE, &self.note_url(id), None).await?;
        Ok(())
    }
}

//! reqwest-backed client for the Ideas Jar REST API.

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::IdeaApi;
use crate::error::{IdeasError, Result};
use crate::model::{Health, Idea, IdeaDraft, IdeaId, Priority, Stats};

/// Public deployment of the API
pub const DEFAULT_ENDPOINT: &str = "https://ideas-jar.onrender.com";

/// HTTP implementation of [`IdeaApi`]
#[derive(Debug, Clone)]
pub struct HttpIdeaApi {
    client: Client,
    endpoint: String,
}

impl HttpIdeaApi {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_options(endpoint, false)
    }

    /// `insecure` skips TLS certificate verification (self-signed tunnels).
    pub fn with_options(endpoint: impl Into<String>, insecure: bool) -> Result<Self> {
        let endpoint = normalize_endpoint(&endpoint.into())?;
        let client = build_client(insecure)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn idea_path(id: &IdeaId) -> String {
        format!("/ideas/{}", urlencoding::encode(&id.to_string()))
    }

    /// Send a request and fail on anything outside 2xx. Error bodies are only logged.
    async fn send(&self, method: Method, path: &str, body: Option<&IdeaDraft>) -> Result<Response> {
        let url = self.url(path);
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(draft) = body {
            request = request.json(draft);
        }

        let response = request
            .send()
            .await
            .map_err(|e| IdeasError::transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            debug!(%status, body = %detail, "request rejected");
            return Err(IdeasError::status(method, url, status));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&IdeaDraft>,
    ) -> Result<T> {
        let context = format!("{} {}", method, path);
        let response = self.send(method, path, body).await?;
        read_json(response, &context).await
    }
}

#[async_trait]
impl IdeaApi for HttpIdeaApi {
    async fn list_by_priority(&self, priority: Option<Priority>) -> Result<Vec<Idea>> {
        let path = match priority {
            Some(priority) => format!("/ideas?priority={}", priority),
            None => "/ideas".to_string(),
        };
        self.send_json(Method::GET, &path, None).await
    }

    async fn get(&self, id: &IdeaId) -> Result<Idea> {
        self.send_json(Method::GET, &Self::idea_path(id), None).await
    }

    async fn create(&self, draft: &IdeaDraft) -> Result<Idea> {
        self.send_json(Method::POST, "/ideas", Some(draft)).await
    }

    async fn update(&self, id: &IdeaId, draft: &IdeaDraft) -> Result<Idea> {
        self.send_json(Method::PUT, &Self::idea_path(id), Some(draft))
            .await
    }

    async fn delete(&self, id: &IdeaId) -> Result<()> {
        self.send(Method::DELETE, &Self::idea_path(id), None).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Idea>> {
        let path = format!("/ideas/search/{}", urlencoding::encode(query));
        self.send_json(Method::GET, &path, None).await
    }

    async fn improve(&self, id: &IdeaId) -> Result<Idea> {
        let path = format!("{}/improve", Self::idea_path(id));
        self.send_json(Method::POST, &path, None).await
    }

    async fn stats(&self) -> Result<Stats> {
        self.send_json(Method::GET, "/stats", None).await
    }

    async fn health(&self) -> Result<Health> {
        self.send_json(Method::GET, "/health", None).await
    }
}

/// Build HTTP client with optional TLS verification skip
fn build_client(insecure: bool) -> Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(insecure)
        .build()
        .map_err(|e| IdeasError::config(format!("failed to build HTTP client: {}", e)))
}

async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
    let url = response.url().to_string();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| IdeasError::transport(url, e))?;
    serde_json::from_slice(&bytes).map_err(|e| IdeasError::decode(context, e))
}

/// Trim whitespace and trailing slashes; require an http(s) scheme.
pub fn normalize_endpoint(raw: &str) -> Result<String> {
    let endpoint = raw.trim().trim_end_matches('/');
    if endpoint.is_empty() {
        return Err(IdeasError::invalid_endpoint(raw, "endpoint is empty"));
    }
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(IdeasError::invalid_endpoint(
            raw,
            "expected an http:// or https:// URL",
        ));
    }
    Ok(endpoint.to_string())
}

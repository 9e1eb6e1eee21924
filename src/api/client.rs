use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientSettings;

use super::error::ApiError;
use super::models::{
    Agent, AgentDraft, Chat, HealthStatus, NewChat, NewMessage, ProviderList,
};

/// The REST surface of the AgentSwarm backend.
///
/// The UI only talks to this trait, so the HTTP implementation can be swapped
/// for an in-memory one in tests.
#[async_trait]
pub trait SwarmApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus, ApiError>;
    /// `GET /agents`
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError>;
    /// `POST /agents`
    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ApiError>;
    /// `GET /chats`
    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError>;
    /// `POST /chats`
    async fn create_chat(&self, request: &NewChat) -> Result<Chat, ApiError>;
    /// `GET /chats/:id`
    async fn get_chat(&self, chat_id: &str) -> Result<Chat, ApiError>;
    /// `POST /chats/:id/messages`, answered with the updated chat.
    async fn send_message(&self, chat_id: &str, message: &NewMessage) -> Result<Chat, ApiError>;
    /// `GET /providers`
    async fn list_providers(&self) -> Result<ProviderList, ApiError>;
}

/// `SwarmApi` over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpSwarmApi {
    client: Client,
    base_url: String,
}

impl HttpSwarmApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers())
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ApiError> {
        Self::new(settings.base_url.clone(), settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl SwarmApi for HttpSwarmApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }

    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        self.get("/agents").await
    }

    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ApiError> {
        self.post("/agents", draft).await
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.get("/chats").await
    }

    async fn create_chat(&self, request: &NewChat) -> Result<Chat, ApiError> {
        self.post("/chats", request).await
    }

    async fn get_chat(&self, chat_id: &str) -> Result<Chat, ApiError> {
        self.get(&format!("/chats/{}", chat_id)).await
    }

    async fn send_message(&self, chat_id: &str, message: &NewMessage) -> Result<Chat, ApiError> {
        self.post(&format!("/chats/{}/messages", chat_id), message)
            .await
    }

    async fn list_providers(&self) -> Result<ProviderList, ApiError> {
        self.get("/providers").await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Turns a response into `T`, or into an `ApiError` carrying the backend's `detail`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status.as_u16(), &body));
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

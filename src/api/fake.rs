//! In-memory `SwarmApi` used by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::client::SwarmApi;
use super::error::ApiError;
use super::models::{
    Agent, AgentDraft, Chat, HealthStatus, Message, NewChat, NewMessage, ProviderInfo,
    ProviderList, Sender,
};

#[derive(Default)]
struct FakeState {
    agents: Vec<Agent>,
    chats: Vec<Chat>,
    providers: Vec<ProviderInfo>,
    next_id: usize,
}

/// Answers like a healthy backend, or with a 503 on every call when `offline`.
#[derive(Default)]
pub struct FakeSwarmApi {
    offline: bool,
    state: Mutex<FakeState>,
}

impl FakeSwarmApi {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_agents(agents: Vec<Agent>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().agents = agents;
        api
    }

    pub fn with_providers(self, providers: Vec<ProviderInfo>) -> Self {
        self.state.lock().unwrap().providers = providers;
        self
    }

    pub fn with_chats(self, chats: Vec<Chat>) -> Self {
        self.state.lock().unwrap().chats = chats;
        self
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.offline {
            Err(ApiError::Status {
                status: 503,
                detail: None,
            })
        } else {
            Ok(())
        }
    }
}

pub fn sample_agent(id: &str, name: &str) -> Agent {
    Agent {
        id: id.into(),
        name: name.into(),
        agent_type: Default::default(),
        description: format!("{} agent", name),
        mcp_connection: super::models::McpConnectionInfo {
            endpoint_url: format!("http://localhost:8080/{}", id),
            metadata: None,
        },
        provider_config: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
    }
}

/// A chat whose messages alternate between user and assistant.
pub fn sample_chat(id: &str, contents: &[&str]) -> Chat {
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    let messages = contents
        .iter()
        .enumerate()
        .map(|(index, content)| Message {
            id: format!("{}-m{}", id, index),
            content: content.to_string(),
            sender: if index % 2 == 0 {
                Sender::User
            } else {
                Sender::Assistant
            },
            created_at: at,
            enabled_agents: Vec::new(),
        })
        .collect();
    Chat {
        id: id.into(),
        title: "New Chat".into(),
        created_at: at,
        updated_at: at,
        messages,
    }
}

#[async_trait]
impl SwarmApi for FakeSwarmApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.check()?;
        Ok(HealthStatus {
            status: "healthy".into(),
        })
    }

    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        self.check()?;
        Ok(self.state.lock().unwrap().agents.clone())
    }

    async fn create_agent(&self, draft: &AgentDraft) -> Result<Agent, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let agent = Agent {
            id: format!("agent-{}", state.next_id),
            name: draft.name.clone(),
            agent_type: draft.agent_type,
            description: draft.description.clone(),
            mcp_connection: draft.mcp_connection.clone(),
            provider_config: draft.provider_config.clone(),
            created_at: Utc::now(),
        };
        state.agents.push(agent.clone());
        Ok(agent)
    }

    async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.check()?;
        Ok(self.state.lock().unwrap().chats.clone())
    }

    async fn create_chat(&self, request: &NewChat) -> Result<Chat, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let chat = Chat {
            id: format!("chat-{}", state.next_id),
            title: request.title.clone().unwrap_or_else(|| "New Chat".into()),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        };
        state.chats.push(chat.clone());
        Ok(chat)
    }

    async fn get_chat(&self, chat_id: &str) -> Result<Chat, ApiError> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .chats
            .iter()
            .find(|chat| chat.id == chat_id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                detail: Some("Chat not found".into()),
            })
    }

    async fn send_message(&self, chat_id: &str, message: &NewMessage) -> Result<Chat, ApiError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        let chat = state
            .chats
            .iter_mut()
            .find(|chat| chat.id == chat_id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                detail: Some("Chat not found".into()),
            })?;
        let now = Utc::now();
        chat.messages.push(Message {
            id: format!("msg-{}-user", id),
            content: message.content.clone(),
            sender: Sender::User,
            created_at: now,
            enabled_agents: message.enabled_agents.clone(),
        });
        chat.messages.push(Message {
            id: format!("msg-{}-assistant", id),
            content: format!("echo: {}", message.content),
            sender: Sender::Assistant,
            created_at: now,
            enabled_agents: message.enabled_agents.clone(),
        });
        chat.updated_at = now;
        Ok(chat.clone())
    }

    async fn list_providers(&self) -> Result<ProviderList, ApiError> {
        self.check()?;
        let providers = self.state.lock().unwrap().providers.clone();
        Ok(ProviderList {
            total: providers.len(),
            providers,
        })
    }
}

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::client::SwarmApi;
use super::error::ApiError;
use super::models::{
    Agent, AgentDraft, Chat, HealthStatus, NewChat, NewMessage, ProviderList,
};

/// A backend call the UI wants performed.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    CheckHealth,
    LoadAgents,
    CreateAgent(AgentDraft),
    LoadChats,
    CreateChat(NewChat),
    LoadChat(String),
    SendMessage { chat_id: String, message: NewMessage },
    LoadProviders,
}

impl ApiRequest {
    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ApiRequest::CheckHealth => "check-health",
            ApiRequest::LoadAgents => "load-agents",
            ApiRequest::CreateAgent(_) => "create-agent",
            ApiRequest::LoadChats => "load-chats",
            ApiRequest::CreateChat(_) => "create-chat",
            ApiRequest::LoadChat(_) => "load-chat",
            ApiRequest::SendMessage { .. } => "send-message",
            ApiRequest::LoadProviders => "load-providers",
        }
    }
}

/// The outcome of an `ApiRequest`, delivered back to the UI task.
#[derive(Debug)]
pub enum ApiEvent {
    HealthChecked(Result<HealthStatus, ApiError>),
    AgentsLoaded(Result<Vec<Agent>, ApiError>),
    AgentCreated(Result<Agent, ApiError>),
    ChatsLoaded(Result<Vec<Chat>, ApiError>),
    ChatCreated(Result<Chat, ApiError>),
    ChatLoaded(Result<Chat, ApiError>),
    MessageSent(Result<Chat, ApiError>),
    ProvidersLoaded(Result<ProviderList, ApiError>),
}

/// Runs backend calls off the UI task.
///
/// Every `dispatch` spawns its own task; results come back through an
/// unbounded channel and are drained with `poll_event` on each tick. Requests
/// are independent: nothing is batched, cancelled, retried or ordered.
pub struct SwarmDispatcher {
    api: Arc<dyn SwarmApi>,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
}

impl SwarmDispatcher {
    pub fn new(api: Arc<dyn SwarmApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            events_tx,
            events_rx,
        }
    }

    /// Spawns `request` and returns immediately.
    pub fn dispatch(&self, request: ApiRequest) {
        debug!("Dispatching {}", request.label());
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), request).await;
            if tx.send(event).is_err() {
                warn!("UI went away before a backend response was delivered");
            }
        });
    }

    /// Non-blocking; `None` when nothing has arrived yet.
    pub fn poll_event(&mut self) -> Option<ApiEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Waits for the next outcome.
    #[cfg(test)]
    pub(crate) async fn next_event(&mut self) -> Option<ApiEvent> {
        self.events_rx.recv().await
    }
}

/// Performs one request against `api` and wraps the outcome.
pub async fn execute(api: &dyn SwarmApi, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::CheckHealth => ApiEvent::HealthChecked(api.health().await),
        ApiRequest::LoadAgents => ApiEvent::AgentsLoaded(api.list_agents().await),
        ApiRequest::CreateAgent(draft) => ApiEvent::AgentCreated(api.create_agent(&draft).await),
        ApiRequest::LoadChats => ApiEvent::ChatsLoaded(api.list_chats().await),
        ApiRequest::CreateChat(new_chat) => {
            ApiEvent::ChatCreated(api.create_chat(&new_chat).await)
        }
        ApiRequest::LoadChat(chat_id) => ApiEvent::ChatLoaded(api.get_chat(&chat_id).await),
        ApiRequest::SendMessage { chat_id, message } => {
            ApiEvent::MessageSent(api.send_message(&chat_id, &message).await)
        }
        ApiRequest::LoadProviders => ApiEvent::ProvidersLoaded(api.list_providers().await),
    }
}

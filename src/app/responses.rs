use log::{error, info, warn};

use super::{App, FocusArea};
use crate::api::{ApiEvent, ApiRequest};

impl App {
    /// Folds a finished backend call into the view state. Failures leave
    /// earlier state untouched and surface as text.
    pub fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::HealthChecked(Ok(health)) => {
                info!("Backend health: {}", health.status);
                self.status_message = format!("Backend: {}", health.status);
                self.health.succeed(health.status);
            }
            ApiEvent::HealthChecked(Err(err)) => {
                match err.status() {
                    Some(code) => warn!("Health check answered HTTP {}: {}", code, err),
                    None => warn!("Backend unreachable: {}", err),
                }
                self.status_message = format!("Health check failed: {}", err);
                self.health.fail(err.to_string());
            }

            ApiEvent::AgentsLoaded(Ok(agents)) => {
                info!("Loaded {} agents", agents.len());
                self.agents.set_agents(agents);
            }
            ApiEvent::AgentsLoaded(Err(err)) => {
                error!("Failed to load agents: {}", err);
                self.agents.loading_failed();
            }

            ApiEvent::AgentCreated(Ok(agent)) => {
                info!("Agent {} created with id {}", agent.name, agent.id);
                self.agent_form.finish_submit(true);
                self.agents.show_success(
                    format!("Agent \"{}\" created successfully!", agent.name),
                    self.settings.banner_timeout(),
                );
                self.status_message = format!("Agent {} created", agent.name);
                self.agents.push_agent(agent);
                self.agents.set_form_visible(false);
                if self.focus == FocusArea::AgentForm {
                    self.focus = FocusArea::Agents;
                }
                self.reload_agents();
            }
            ApiEvent::AgentCreated(Err(err)) => {
                error!("Failed to create agent: {}", err);
                self.agent_form.finish_submit(false);
                self.agents.show_error(err.to_string());
                self.status_message = format!("Failed to create agent: {}", err);
            }

            ApiEvent::ChatsLoaded(Ok(chats)) => {
                info!("Loaded {} chats", chats.len());
                self.chats.set_chats(chats);
            }
            ApiEvent::ChatsLoaded(Err(err)) => {
                error!("Failed to load chats: {}", err);
                self.chats.loading_failed();
            }

            ApiEvent::ChatCreated(Ok(chat)) => {
                info!("Chat {} created", chat.id);
                self.creating_chat = false;
                let chat_id = chat.id.clone();
                self.chats.upsert(chat.clone());
                self.chats.set_active(&chat_id);
                self.chat.set_chat(chat);
                self.focus = FocusArea::Chat;
                match self.chat.take_pending() {
                    Some(message) => {
                        self.status_message = String::from("Sending message...");
                        self.dispatcher
                            .dispatch(ApiRequest::SendMessage { chat_id, message });
                    }
                    None => self.status_message = String::from("New chat started"),
                }
            }
            ApiEvent::ChatCreated(Err(err)) => {
                error!("Failed to create chat: {}", err);
                self.creating_chat = false;
                if let Some(message) = self.chat.take_pending() {
                    self.chat.finish_send(None);
                    self.chat.edit_input(|input| input.set(message.content));
                }
                self.status_message = format!("Failed to create chat: {}", err);
            }

            ApiEvent::ChatLoaded(Ok(chat)) => {
                if self.chat.chat_id() == Some(chat.id.as_str()) {
                    self.chat.set_chat(chat.clone());
                }
                self.chats.upsert(chat);
            }
            ApiEvent::ChatLoaded(Err(err)) => {
                error!("Failed to load chat: {}", err);
                self.status_message = format!("Failed to load chat: {}", err);
            }

            ApiEvent::MessageSent(Ok(chat)) => {
                let is_current = self.chat.chat_id() == Some(chat.id.as_str());
                self.chats.upsert(chat.clone());
                self.chat.finish_send(is_current.then_some(chat));
                self.status_message = String::from("Message sent");
            }
            ApiEvent::MessageSent(Err(err)) => {
                error!("Failed to send message: {}", err);
                self.chat.finish_send(None);
                self.status_message = format!("Failed to send message: {}", err);
            }

            ApiEvent::ProvidersLoaded(Ok(list)) => {
                info!("Loaded {} providers", list.providers.len());
                self.providers = list.providers;
            }
            ApiEvent::ProvidersLoaded(Err(err)) => {
                warn!("Failed to load providers: {}", err);
            }
        }
    }
}

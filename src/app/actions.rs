use chrono::Utc;
use log::{debug, info, warn};

use super::{App, FocusArea, OverlayState};
use crate::api::ApiRequest;
use crate::api::models::NewChat;
use crate::config::ChatMode;
use crate::forms::{FormError, FormField};
use crate::panels::chat::{local_chat, push_local_exchange};

/// Every user-triggerable operation, whatever key it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Quit,
    FocusNext,
    FocusPrevious,
    CheckHealth,
    Reload,
    NewChat,
    OpenSelectedChat,
    SendMessage,
    SubmitAgent,
    ToggleAgentForm,
    ToggleSelectedAgent,
    ClearEnabledAgents,
    ShowProviders,
    ShowHelp,
}

impl App {
    /// The single place a `CommandAction` is carried out.
    pub fn execute_action(&mut self, action: CommandAction) {
        debug!("Executing action {:?}", action);
        match action {
            CommandAction::Quit => self.should_quit = true,
            CommandAction::FocusNext => self.cycle_focus(1),
            CommandAction::FocusPrevious => self.cycle_focus(-1),
            CommandAction::CheckHealth => self.check_health(),
            CommandAction::Reload => {
                self.reload_agents();
                self.reload_chats();
            }
            CommandAction::NewChat => self.new_chat(),
            CommandAction::OpenSelectedChat => self.open_selected_chat(),
            CommandAction::SendMessage => self.send_message(),
            CommandAction::SubmitAgent => self.submit_agent(),
            CommandAction::ToggleAgentForm => self.toggle_agent_form(),
            CommandAction::ToggleSelectedAgent => self.toggle_selected_agent(),
            CommandAction::ClearEnabledAgents => {
                self.agents.clear_enabled();
                self.status_message = String::from("All agents disabled");
            }
            CommandAction::ShowProviders => self.show_providers(),
            CommandAction::ShowHelp => self.overlay = Some(OverlayState::Help),
        }
    }

    pub(crate) fn check_health(&mut self) {
        if self.health.begin() {
            self.status_message = String::from("Checking backend health...");
            self.dispatcher.dispatch(ApiRequest::CheckHealth);
        }
    }

    pub(crate) fn reload_agents(&mut self) {
        self.agents.begin_loading();
        self.dispatcher.dispatch(ApiRequest::LoadAgents);
    }

    /// Only remote chats can be reloaded.
    pub(crate) fn reload_chats(&mut self) {
        if self.settings.chat_mode == ChatMode::Remote {
            self.chats.begin_loading();
            self.dispatcher.dispatch(ApiRequest::LoadChats);
        }
    }

    fn new_chat(&mut self) {
        match self.settings.chat_mode {
            ChatMode::Local => {
                let chat = local_chat(self.chats.next_local_id(), Utc::now());
                info!("Created local chat {}", chat.id);
                self.status_message = format!("{} created", chat.title);
                self.chats.upsert(chat.clone());
                self.chats.set_active(&chat.id);
                self.chat.set_chat(chat);
                self.focus = FocusArea::Chat;
            }
            ChatMode::Remote => self.request_chat(),
        }
    }

    /// At most one chat creation is in flight; later requests wait for it.
    fn request_chat(&mut self) {
        self.status_message = String::from("Creating chat...");
        if self.creating_chat {
            debug!("Chat creation already in flight");
            return;
        }
        self.creating_chat = true;
        self.dispatcher
            .dispatch(ApiRequest::CreateChat(NewChat::default()));
    }

    fn open_selected_chat(&mut self) {
        let Some(chat) = self.chats.selected_chat().cloned() else {
            return;
        };
        let chat_id = chat.id.clone();
        self.chats.set_active(&chat_id);
        self.chat.set_chat(chat);
        self.focus = FocusArea::Chat;
        if self.settings.chat_mode == ChatMode::Remote {
            self.dispatcher.dispatch(ApiRequest::LoadChat(chat_id));
        }
    }

    fn send_message(&mut self) {
        let enabled = self.agents.enabled_ids().to_vec();
        let Some(message) = self.chat.begin_send(&enabled) else {
            return;
        };

        match self.settings.chat_mode {
            ChatMode::Local => {
                if self.chat.chat().is_none() {
                    let chat = local_chat(self.chats.next_local_id(), Utc::now());
                    self.chats.set_active(&chat.id);
                    self.chat.set_chat(chat);
                }
                if let Some(chat) = self.chat.chat_mut() {
                    push_local_exchange(chat, &message, Utc::now());
                    let updated = chat.clone();
                    self.chats.upsert(updated);
                }
                self.chat.finish_send(None);
            }
            ChatMode::Remote => match self.chat.chat_id().map(String::from) {
                Some(chat_id) => {
                    self.status_message = String::from("Sending message...");
                    self.dispatcher
                        .dispatch(ApiRequest::SendMessage { chat_id, message });
                }
                None => {
                    self.chat.hold_pending(message);
                    self.request_chat();
                }
            },
        }
    }

    fn submit_agent(&mut self) {
        match self.agent_form.begin_submit() {
            None => {}
            Some(Ok(draft)) => {
                info!("Creating agent {}", draft.name);
                self.agents.clear_banner();
                self.status_message = format!("Creating agent {}...", draft.name);
                self.dispatcher.dispatch(ApiRequest::CreateAgent(draft));
            }
            Some(Err(FormError::InvalidMetadata)) => {
                warn!("Rejected agent form: invalid metadata JSON");
                self.agent_form.focus(FormField::Metadata);
                self.alert("Invalid metadata", FormError::InvalidMetadata.to_string());
            }
            Some(Err(err)) => {
                self.status_message = err.to_string();
            }
        }
    }

    fn toggle_agent_form(&mut self) {
        let visible = !self.agents.form_visible();
        self.agents.set_form_visible(visible);
        if visible {
            self.focus = FocusArea::AgentForm;
        } else if self.focus == FocusArea::AgentForm {
            self.focus = FocusArea::Agents;
        }
    }

    fn toggle_selected_agent(&mut self) {
        let name = self.agents.selected_agent().map(|agent| agent.name.clone());
        if let (Some(enabled), Some(name)) = (self.agents.toggle_selected(), name) {
            self.status_message = if enabled {
                format!("Enabled {}", name)
            } else {
                format!("Disabled {}", name)
            };
        }
    }

    fn show_providers(&mut self) {
        if self.providers.is_empty() {
            self.status_message = String::from("No providers available, reloading...");
            self.dispatcher.dispatch(ApiRequest::LoadProviders);
            return;
        }
        self.overlay = Some(OverlayState::Providers { selected: 0 });
    }

    /// Copies the provider at `index` into the agent form and shows the form.
    pub(crate) fn apply_provider(&mut self, index: usize) {
        let Some(provider) = self.providers.get(index).cloned() else {
            return;
        };
        self.agent_form.apply_provider(&provider);
        self.agents.set_form_visible(true);
        self.agent_form.focus(FormField::Model);
        self.focus = FocusArea::AgentForm;
        self.status_message = format!("Using provider {}", provider.name);
    }
}

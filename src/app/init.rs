use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};

use super::{App, FocusArea};
use crate::api::{ApiRequest, SwarmApi, SwarmDispatcher};
use crate::config::{ChatMode, ClientSettings};
use crate::forms::AgentForm;
use crate::panels::chat::local_chat;
use crate::panels::{AgentPanel, ChatHistory, ChatWindow, HealthState};

impl App {
    /// Creates the application state. Nothing is requested until `start`.
    pub fn new(settings: ClientSettings, api: Arc<dyn SwarmApi>) -> Self {
        debug!(
            "Initializing App against {} ({:?} chats)",
            settings.base_url, settings.chat_mode
        );
        Self {
            should_quit: false,
            focus: FocusArea::Chat,
            overlay: None,
            settings,
            health: HealthState::default(),
            agents: AgentPanel::new(),
            agent_form: AgentForm::new(),
            chats: ChatHistory::new(),
            chat: ChatWindow::new(),
            providers: Vec::new(),
            status_message: String::from("Tab to switch panes, F1 for help, Ctrl+Q to quit"),
            dispatcher: SwarmDispatcher::new(api),
            creating_chat: false,
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Kicks off the initial health check and list loads.
    pub fn start(&mut self) {
        info!("Starting AgentSwarm client against {}", self.settings.base_url);
        self.check_health();
        self.reload_agents();
        match self.settings.chat_mode {
            ChatMode::Remote => self.reload_chats(),
            ChatMode::Local => {
                let chat = local_chat(self.chats.next_local_id(), Utc::now());
                self.chats.upsert(chat.clone());
                self.chats.set_active(&chat.id);
                self.chat.set_chat(chat);
            }
        }
        self.dispatcher.dispatch(ApiRequest::LoadProviders);
    }
}

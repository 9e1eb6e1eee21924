use chrono::{DateTime, Utc};

use crate::api::models::{Chat, Message, NewMessage, Sender};
use crate::forms::TextInput;

pub const NO_CHAT_TITLE: &str = "Select a chat or start a new conversation";
pub const WELCOME_HEADING: &str = "Welcome to AgentSwarm";
pub const WELCOME_TEXT: &str =
    "Select a chat from the history or create a new one to start conversing with your agents.";
pub const EMPTY_HEADING: &str = "Start a conversation";
pub const EMPTY_TEXT: &str =
    "Type your message below to begin chatting with the enabled agents.";
pub const NO_AGENTS_PLACEHOLDER: &str = "Select agents from the panel to start chatting...";
pub const PLACEHOLDER_REPLY: &str = "This is a placeholder response.";
pub const SEND_LABEL: &str = "→";
pub const SENDING_LABEL: &str = "...";

/// `1 agent` / `3 agents`
pub fn agents_label(count: usize) -> String {
    format!("{} agent{}", count, if count == 1 { "" } else { "s" })
}

/// The conversation in the centre of the screen plus its composer.
#[derive(Debug, Default)]
pub struct ChatWindow {
    chat: Option<Chat>,
    input: TextInput,
    sending: bool,
    pending: Option<NewMessage>,
}

impl ChatWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat(&self) -> Option<&Chat> {
        self.chat.as_ref()
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat.as_ref().map(|chat| chat.id.as_str())
    }

    pub fn set_chat(&mut self, chat: Chat) {
        self.chat = Some(chat);
    }

    pub fn chat_mut(&mut self) -> Option<&mut Chat> {
        self.chat.as_mut()
    }

    pub fn title(&self) -> &str {
        self.chat
            .as_ref()
            .map(|chat| chat.title.as_str())
            .unwrap_or(NO_CHAT_TITLE)
    }

    /// `<n> agent(s) enabled`, shown only when something is enabled.
    pub fn enabled_indicator(enabled: usize) -> Option<String> {
        (enabled > 0).then(|| format!("{} enabled", agents_label(enabled)))
    }

    pub fn placeholder(enabled: usize) -> String {
        if enabled > 0 {
            format!("Message {} enabled {}...", enabled, agent_word(enabled))
        } else {
            NO_AGENTS_PLACEHOLDER.to_string()
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// Composer edits are ignored while a message is in flight.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut TextInput)) {
        if !self.sending {
            edit(&mut self.input);
        }
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn send_label(&self) -> &'static str {
        if self.sending {
            SENDING_LABEL
        } else {
            SEND_LABEL
        }
    }

    /// Takes the trimmed composer text and marks the window as sending.
    /// Returns `None` for blank input or while another send is in flight.
    pub fn begin_send(&mut self, enabled_agents: &[String]) -> Option<NewMessage> {
        if self.sending || self.input.value().trim().is_empty() {
            return None;
        }
        let content = self.input.take().trim().to_string();
        self.sending = true;
        Some(NewMessage {
            content,
            enabled_agents: enabled_agents.to_vec(),
        })
    }

    /// Parks a message until the chat it belongs to has been created.
    pub fn hold_pending(&mut self, message: NewMessage) {
        self.pending = Some(message);
    }

    pub fn take_pending(&mut self) -> Option<NewMessage> {
        self.pending.take()
    }

    /// Ends the in-flight send, adopting the updated chat when there is one.
    pub fn finish_send(&mut self, updated: Option<Chat>) {
        self.sending = false;
        self.pending = None;
        if let Some(chat) = updated {
            self.chat = Some(chat);
        }
    }
}

fn agent_word(count: usize) -> &'static str {
    if count == 1 { "agent" } else { "agents" }
}

/// Appends the user's message and the canned assistant reply to an in-memory chat.
pub fn push_local_exchange(chat: &mut Chat, message: &NewMessage, now: DateTime<Utc>) {
    let base = chat.messages.len();
    chat.messages.push(Message {
        id: format!("{}-{}", chat.id, base + 1),
        content: message.content.clone(),
        sender: Sender::User,
        created_at: now,
        enabled_agents: message.enabled_agents.clone(),
    });
    chat.messages.push(Message {
        id: format!("{}-{}", chat.id, base + 2),
        content: PLACEHOLDER_REPLY.to_string(),
        sender: Sender::Assistant,
        created_at: now,
        enabled_agents: Vec::new(),
    });
    chat.updated_at = now;
}

/// A fresh in-memory chat titled `Chat <id>`.
pub fn local_chat(id: u64, now: DateTime<Utc>) -> Chat {
    Chat {
        id: id.to_string(),
        title: format!("Chat {}", id),
        created_at: now,
        updated_at: now,
        messages: Vec::new(),
    }
}

//! The central `App` struct and the small enums that describe where input goes.

use std::time::Duration;

use crate::api::SwarmDispatcher;
use crate::api::models::ProviderInfo;
use crate::config::ClientSettings;
use crate::forms::AgentForm;
use crate::panels::{AgentPanel, ChatHistory, ChatWindow, HealthState};

/// The pane that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    ChatList,
    Chat,
    Agents,
    AgentForm,
}

/// Modal content drawn above everything else. While one is open it
/// captures all keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    /// Blocking message; dismissed with Enter or Esc.
    Alert { title: String, message: String },
    /// Provider picker; `selected` indexes `App::providers`.
    Providers { selected: usize },
    Help,
}

/// Everything the client knows and shows.
pub struct App {
    /// Set when the event loop should stop.
    pub should_quit: bool,
    pub focus: FocusArea,
    pub overlay: Option<OverlayState>,
    pub settings: ClientSettings,
    pub health: HealthState,
    pub agents: AgentPanel,
    pub agent_form: AgentForm,
    pub chats: ChatHistory,
    pub chat: ChatWindow,
    /// Providers reported by `GET /providers`.
    pub providers: Vec<ProviderInfo>,
    /// Text shown in the status bar.
    pub status_message: String,

    pub(crate) dispatcher: SwarmDispatcher,
    /// A `POST /chats` is in flight; a held message waits for its answer.
    pub(crate) creating_chat: bool,
    pub(crate) tick_rate: Duration,
}

impl App {
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Panes in Tab order; the form only takes part while it is shown.
    pub(crate) fn focus_order(&self) -> Vec<FocusArea> {
        let mut order = vec![FocusArea::ChatList, FocusArea::Chat, FocusArea::Agents];
        if self.agents.form_visible() {
            order.push(FocusArea::AgentForm);
        }
        order
    }

    pub(crate) fn cycle_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let current = order
            .iter()
            .position(|area| *area == self.focus)
            .unwrap_or(0) as isize;
        let len = order.len() as isize;
        self.focus = order[(current + delta).rem_euclid(len) as usize];
    }

    pub(crate) fn alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.overlay = Some(OverlayState::Alert {
            title: title.into(),
            message: message.into(),
        });
    }
}

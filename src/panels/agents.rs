use std::time::{Duration, Instant};

use crate::api::models::Agent;

pub const EMPTY_STATE: &str =
    "No agents created yet. Create your first agent using the form above.";
pub const LOADING_TEXT: &str = "Loading agents...";
pub const CLEAR_ALL_LABEL: &str = "Clear All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A transient message shown above the agent list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    expires_at: Option<Instant>,
}

impl Banner {
    pub fn icon(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "✅",
            BannerKind::Error => "❌",
        }
    }
}

/// Agents known to the client and which of them are enabled for chatting.
#[derive(Debug, Default)]
pub struct AgentPanel {
    agents: Vec<Agent>,
    enabled: Vec<String>,
    loading: bool,
    selected: usize,
    banner: Option<Banner>,
    form_visible: bool,
}

impl AgentPanel {
    pub fn new() -> Self {
        Self {
            form_visible: true,
            ..Self::default()
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Replaces the list. Enabled ids that no longer exist are dropped.
    pub fn set_agents(&mut self, agents: Vec<Agent>) {
        self.loading = false;
        self.enabled
            .retain(|id| agents.iter().any(|agent| &agent.id == id));
        self.agents = agents;
        self.clamp_selection();
    }

    /// Ends a failed load, keeping whatever was listed before.
    pub fn loading_failed(&mut self) {
        self.loading = false;
    }

    /// Appends a freshly created agent ahead of the next reload.
    pub fn push_agent(&mut self, agent: Agent) {
        if let Some(existing) = self.agents.iter_mut().find(|a| a.id == agent.id) {
            *existing = agent;
        } else {
            self.agents.push(agent);
        }
    }

    pub fn heading(&self) -> String {
        if self.loading {
            String::from("Agents")
        } else {
            format!("Agents ({})", self.agents.len())
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.agents.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.agents.is_empty() {
            return;
        }
        let last = self.agents.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.agents.len().saturating_sub(1));
    }

    pub fn is_enabled(&self, agent_id: &str) -> bool {
        self.enabled.iter().any(|id| id == agent_id)
    }

    pub fn toggle(&mut self, agent_id: &str) {
        if let Some(pos) = self.enabled.iter().position(|id| id == agent_id) {
            self.enabled.remove(pos);
        } else {
            self.enabled.push(agent_id.to_string());
        }
    }

    pub fn toggle_selected(&mut self) -> Option<bool> {
        let id = self.selected_agent()?.id.clone();
        self.toggle(&id);
        Some(self.is_enabled(&id))
    }

    pub fn clear_enabled(&mut self) {
        self.enabled.clear();
    }

    /// Enabled agent ids in the order they were enabled.
    pub fn enabled_ids(&self) -> &[String] {
        &self.enabled
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.len()
    }

    pub fn summary(&self) -> String {
        if self.enabled.is_empty() {
            String::from("No agents enabled")
        } else {
            format!(
                "{} of {} agents enabled",
                self.enabled.len(),
                self.agents.len()
            )
        }
    }

    pub fn show_success(&mut self, text: impl Into<String>, ttl: Duration) {
        self.banner = Some(Banner {
            kind: BannerKind::Success,
            text: text.into(),
            expires_at: Some(Instant::now() + ttl),
        });
    }

    /// Error banners stay until replaced.
    pub fn show_error(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Error,
            text: text.into(),
            expires_at: None,
        });
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    pub fn expire_banner(&mut self, now: Instant) {
        if self
            .banner
            .as_ref()
            .and_then(|banner| banner.expires_at)
            .is_some_and(|deadline| now >= deadline)
        {
            self.banner = None;
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn set_form_visible(&mut self, visible: bool) {
        self.form_visible = visible;
    }

    /// Label of the button that shows/hides the creation form.
    pub fn form_toggle_label(&self) -> &'static str {
        if self.form_visible { "×" } else { "+" }
    }
}

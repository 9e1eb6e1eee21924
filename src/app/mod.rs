//! Application state and input routing.
//!
//! `state` defines `App` and the focus/overlay enums, `init` builds it,
//! `actions` carries out user commands, `responses` folds backend results
//! back in, `keyboard` maps keys to commands and `tick` drives the periodic
//! work of the event loop.

mod actions;
mod init;
mod keyboard;
mod responses;
mod state;
mod tick;

pub use actions::CommandAction;
pub use state::{App, FocusArea, OverlayState};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::Map;

    use super::*;
    use crate::api::SwarmApi;
    use crate::api::fake::{FakeSwarmApi, sample_agent, sample_chat};
    use crate::api::models::{NewChat, ProviderInfo, Sender};
    use crate::config::{ChatMode, ClientSettings};
    use crate::forms::FormField;
    use crate::panels::chat::PLACEHOLDER_REPLY;

    fn app_with(api: FakeSwarmApi, chat_mode: ChatMode) -> App {
        let settings = ClientSettings {
            chat_mode,
            ..ClientSettings::default()
        };
        let api: Arc<dyn SwarmApi> = Arc::new(api);
        App::new(settings, api)
    }

    /// Keeps a handle on the fake so a test can change the backend behind the app.
    fn shared_app(api: &Arc<FakeSwarmApi>) -> App {
        let shared: Arc<dyn SwarmApi> = api.clone();
        App::new(ClientSettings::default(), shared)
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    /// Waits for `count` backend results and applies them.
    async fn settle(app: &mut App, count: usize) {
        for _ in 0..count {
            let event = app.dispatcher.next_event().await.expect("dispatcher closed");
            app.apply_api_event(event);
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn fill_required(app: &mut App) {
        app.agent_form.set_value(FormField::Name, "Scout");
        app.agent_form.set_value(FormField::Description, "Finds things");
        app.agent_form
            .set_value(FormField::EndpointUrl, "http://localhost:8080/mcp");
    }

    #[tokio::test]
    async fn offline_backend_reports_health_error() {
        let mut app = app_with(FakeSwarmApi::offline(), ChatMode::Remote);
        app.start();
        assert_eq!(app.health.button_label(), "Checking...");
        settle(&mut app, 4).await;

        assert_eq!(app.health.error(), Some("HTTP error! status: 503"));
        assert_eq!(app.health.button_label(), "Check Backend Health");
        assert!(!app.agents.is_loading());
        assert!(app.agents.agents().is_empty());
        assert!(!app.chats.is_loading());
    }

    #[tokio::test]
    async fn start_loads_agents_and_health() {
        let api = FakeSwarmApi::with_agents(vec![sample_agent("a1", "Alpha")]);
        let mut app = app_with(api, ChatMode::Remote);
        app.start();
        settle(&mut app, 4).await;

        assert_eq!(app.health.status(), Some("healthy"));
        assert_eq!(app.agents.heading(), "Agents (1)");
        assert_eq!(app.chats.chats().len(), 0);
    }

    #[tokio::test]
    async fn creating_an_agent_toggles_label_and_shows_banner() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        app.start();
        settle(&mut app, 4).await;

        fill_required(&mut app);
        app.execute_action(CommandAction::SubmitAgent);
        assert_eq!(app.agent_form.submit_label(), "Creating Agent...");

        settle(&mut app, 1).await;
        assert_eq!(app.agent_form.submit_label(), "Create Agent");
        assert_eq!(app.agent_form.value(FormField::Name), "");
        let banner = app.agents.banner().expect("banner");
        assert_eq!(banner.text, "Agent \"Scout\" created successfully!");
        assert_eq!(app.agents.agents().len(), 1);
        assert!(!app.agents.form_visible());

        settle(&mut app, 1).await;
        assert_eq!(app.agents.heading(), "Agents (1)");
    }

    #[tokio::test]
    async fn failed_creation_keeps_form_contents() {
        let mut app = app_with(FakeSwarmApi::offline(), ChatMode::Remote);
        fill_required(&mut app);
        app.execute_action(CommandAction::SubmitAgent);
        settle(&mut app, 1).await;

        assert_eq!(app.agent_form.value(FormField::Name), "Scout");
        assert_eq!(app.agent_form.submit_label(), "Create Agent");
        assert_eq!(
            app.agents.banner().map(|banner| banner.text.as_str()),
            Some("HTTP error! status: 503")
        );
    }

    #[test]
    fn invalid_metadata_opens_alert() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        fill_required(&mut app);
        app.agent_form.set_value(FormField::Metadata, "{not json");
        app.execute_action(CommandAction::SubmitAgent);

        assert!(matches!(
            &app.overlay,
            Some(OverlayState::Alert { message, .. }) if message == "Invalid JSON in metadata field"
        ));
        assert!(!app.agent_form.is_submitting());
        assert_eq!(app.agent_form.focused(), FormField::Metadata);

        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn missing_field_goes_to_status_bar() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        app.execute_action(CommandAction::SubmitAgent);
        assert_eq!(app.status_message, "Agent Name is required");
        assert!(app.overlay.is_none());
    }

    #[tokio::test]
    async fn remote_send_creates_chat_first() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        app.start();
        settle(&mut app, 4).await;
        assert!(app.chat.chat().is_none());

        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        assert!(app.chat.is_sending());
        assert!(app.chat.input().is_empty());

        settle(&mut app, 2).await;
        let chat = app.chat.chat().expect("chat created");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].content, "hello");
        assert_eq!(chat.messages[1].sender, Sender::Assistant);
        assert!(!app.chat.is_sending());
        assert_eq!(app.chats.chats().len(), 1);
        assert!(app.chats.is_active(chat));
    }

    #[tokio::test]
    async fn message_typed_during_new_chat_lands_in_that_chat() {
        let api = Arc::new(FakeSwarmApi::default());
        let mut app = shared_app(&api);

        ctrl(&mut app, 'n');
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        assert!(app.chat.is_sending());

        settle(&mut app, 2).await;
        let chat = app.chat.chat().expect("chat created");
        assert_eq!(chat.id, "chat-1");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].content, "hello");
        assert!(!app.chat.is_sending());
        assert_eq!(app.chats.chats().len(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(app.dispatcher.poll_event().is_none());
        assert_eq!(api.list_chats().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_chat_creation_returns_message_to_composer() {
        let mut app = app_with(FakeSwarmApi::offline(), ChatMode::Remote);
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        assert!(app.chat.input().is_empty());

        settle(&mut app, 1).await;
        assert!(!app.chat.is_sending());
        assert!(app.chat.chat().is_none());
        assert_eq!(app.chat.input().value(), "hello");
        assert!(app.status_message.starts_with("Failed to create chat"));

        press(&mut app, KeyCode::Enter);
        assert!(app.chat.is_sending());
        assert_eq!(app.status_message, "Creating chat...");
    }

    #[tokio::test]
    async fn failed_send_keeps_chat_and_unlocks_composer() {
        let mut app = app_with(FakeSwarmApi::offline(), ChatMode::Remote);
        app.chat.set_chat(sample_chat("c1", &["earlier"]));
        type_text(&mut app, "hi");
        press(&mut app, KeyCode::Enter);
        assert!(app.chat.is_sending());

        settle(&mut app, 1).await;
        assert!(!app.chat.is_sending());
        assert_eq!(app.chat.chat_id(), Some("c1"));
        assert_eq!(app.chat.chat().map(|chat| chat.messages.len()), Some(1));
        assert_eq!(
            app.status_message,
            "Failed to send message: HTTP error! status: 503"
        );
    }

    #[tokio::test]
    async fn opening_a_chat_fetches_its_messages() {
        let api =
            FakeSwarmApi::default().with_chats(vec![sample_chat("c1", &["hi", "there"])]);
        let mut app = app_with(api, ChatMode::Remote);
        app.chats.set_chats(vec![sample_chat("c1", &[])]);
        app.focus = FocusArea::ChatList;

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, FocusArea::Chat);
        assert_eq!(app.chat.chat_id(), Some("c1"));
        assert_eq!(app.chats.active_id(), Some("c1"));
        assert!(app.chat.chat().is_some_and(|chat| chat.messages.is_empty()));

        settle(&mut app, 1).await;
        let chat = app.chat.chat().expect("chat");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].sender, Sender::Assistant);
        assert_eq!(app.chats.get("c1").map(|chat| chat.messages.len()), Some(2));
    }

    #[tokio::test]
    async fn tick_applies_answers_and_expires_banner() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        app.check_health();
        assert!(app.health.is_loading());

        for _ in 0..100 {
            if !app.health.is_loading() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            app.on_tick();
        }
        assert_eq!(app.health.status(), Some("healthy"));

        app.agents.show_success("Saved", Duration::ZERO);
        app.on_tick();
        assert!(app.agents.banner().is_none());

        app.agents.show_error("Broken");
        app.on_tick();
        assert!(app.agents.banner().is_some());
    }

    #[tokio::test]
    async fn clear_all_disables_every_agent() {
        let api = FakeSwarmApi::with_agents(vec![
            sample_agent("a1", "Alpha"),
            sample_agent("a2", "Beta"),
        ]);
        let mut app = app_with(api, ChatMode::Remote);
        app.start();
        settle(&mut app, 4).await;

        app.focus = FocusArea::Agents;
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.agents.enabled_count(), 2);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.agents.enabled_count(), 0);
        assert_eq!(app.status_message, "All agents disabled");
        assert_eq!(app.agents.summary(), "No agents enabled");
    }

    #[tokio::test]
    async fn reload_picks_up_backend_changes() {
        let api = Arc::new(FakeSwarmApi::default());
        let mut app = shared_app(&api);
        app.start();
        settle(&mut app, 4).await;
        assert!(app.chats.chats().is_empty());

        api.create_chat(&NewChat::default()).await.unwrap();
        ctrl(&mut app, 'r');
        assert!(app.agents.is_loading());
        assert!(app.chats.is_loading());

        settle(&mut app, 2).await;
        assert!(!app.agents.is_loading());
        assert!(!app.chats.is_loading());
        assert_eq!(app.chats.chats().len(), 1);
    }

    #[tokio::test]
    async fn send_carries_enabled_agents() {
        let api = FakeSwarmApi::with_agents(vec![sample_agent("a1", "Alpha")]);
        let mut app = app_with(api, ChatMode::Remote);
        app.start();
        settle(&mut app, 4).await;

        app.focus = FocusArea::Agents;
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.agents.enabled_ids(), ["a1".to_string()]);

        app.focus = FocusArea::Chat;
        type_text(&mut app, "go");
        press(&mut app, KeyCode::Enter);
        settle(&mut app, 2).await;

        let chat = app.chat.chat().expect("chat");
        assert_eq!(chat.messages[0].enabled_agents, vec!["a1".to_string()]);
    }

    #[tokio::test]
    async fn local_mode_answers_with_placeholder() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Local);
        app.start();
        assert_eq!(app.chat.title(), "Chat 1");

        type_text(&mut app, "hi");
        press(&mut app, KeyCode::Enter);
        let chat = app.chat.chat().expect("local chat");
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].content, PLACEHOLDER_REPLY);
        assert!(!app.chat.is_sending());

        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert_eq!(app.chat.title(), "Chat 2");
        assert_eq!(app.chats.chats().len(), 2);
    }

    #[test]
    fn tab_cycles_focus_and_skips_hidden_form() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        assert_eq!(app.focus, FocusArea::Chat);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusArea::Agents);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusArea::AgentForm);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusArea::ChatList);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, FocusArea::AgentForm);

        press(&mut app, KeyCode::F(2));
        assert!(!app.agents.form_visible());
        assert_eq!(app.focus, FocusArea::Agents);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, FocusArea::ChatList);
    }

    #[test]
    fn form_keys_edit_fields_and_cycle_type() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        app.focus = FocusArea::AgentForm;
        type_text(&mut app, "Scout");
        assert_eq!(app.agent_form.value(FormField::Name), "Scout");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.agent_form.focused(), FormField::AgentType);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.agent_form.value(FormField::AgentType), "Task");
    }

    #[tokio::test]
    async fn provider_overlay_fills_form() {
        let provider = ProviderInfo {
            provider_id: "openai-main".into(),
            provider_type: "openai".into(),
            name: "OpenAI".into(),
            description: String::new(),
            config: Map::new(),
            default_model: Some("gpt-4o-mini".into()),
        };
        let api = FakeSwarmApi::default().with_providers(vec![provider]);
        let mut app = app_with(api, ChatMode::Remote);
        app.start();
        settle(&mut app, 4).await;

        press(&mut app, KeyCode::F(3));
        assert_eq!(app.overlay, Some(OverlayState::Providers { selected: 0 }));
        press(&mut app, KeyCode::Enter);

        assert!(app.overlay.is_none());
        assert_eq!(app.focus, FocusArea::AgentForm);
        assert_eq!(app.agent_form.focused(), FormField::Model);
        assert_eq!(app.agent_form.value(FormField::ProviderId), "openai-main");
        assert_eq!(app.agent_form.value(FormField::Model), "gpt-4o-mini");
    }

    #[test]
    fn quit_and_help_shortcuts() {
        let mut app = app_with(FakeSwarmApi::default(), ChatMode::Remote);
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.overlay, Some(OverlayState::Help));
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}

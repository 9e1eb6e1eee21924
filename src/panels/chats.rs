use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

use crate::api::models::Chat;

pub const HEADING: &str = "Chat History";
pub const NEW_CHAT_LABEL: &str = "+ New Chat";
pub const LOADING_TEXT: &str = "Loading chats...";
pub const EMPTY_STATE: &str = "No chats yet. Start a new conversation!";

const PREVIEW_CHARS: usize = 50;

/// The list of chats on the left-hand side.
#[derive(Debug, Default)]
pub struct ChatHistory {
    chats: Vec<Chat>,
    loading: bool,
    selected: usize,
    active_id: Option<String>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn set_chats(&mut self, chats: Vec<Chat>) {
        self.loading = false;
        self.chats = chats;
        self.selected = self.selected.min(self.chats.len().saturating_sub(1));
    }

    pub fn loading_failed(&mut self) {
        self.loading = false;
    }

    /// Replaces the chat with the same id, or appends it.
    pub fn upsert(&mut self, chat: Chat) {
        match self.chats.iter_mut().find(|existing| existing.id == chat.id) {
            Some(existing) => *existing = chat,
            None => self.chats.push(chat),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|chat| chat.id == chat_id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Marks `chat_id` active and moves the selection onto it.
    pub fn set_active(&mut self, chat_id: &str) {
        if let Some(pos) = self.chats.iter().position(|chat| chat.id == chat_id) {
            self.selected = pos;
        }
        self.active_id = Some(chat_id.to_string());
    }

    pub fn is_active(&self, chat: &Chat) -> bool {
        self.active_id.as_deref() == Some(chat.id.as_str())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_chat(&self) -> Option<&Chat> {
        self.chats.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.chats.is_empty() {
            return;
        }
        let last = self.chats.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    /// Next id for an in-memory chat: one past the last numeric id, starting at 1.
    pub fn next_local_id(&self) -> u64 {
        self.chats
            .last()
            .and_then(|chat| chat.id.parse::<u64>().ok())
            .map(|id| id + 1)
            .unwrap_or(1)
    }
}

/// `<n> msgs`
pub fn message_count_label(chat: &Chat) -> String {
    format!("{} msgs", chat.messages.len())
}

/// The last message, cut to 50 characters with a trailing `...`.
pub fn preview(chat: &Chat) -> Option<String> {
    let content = &chat.last_message()?.content;
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    if content.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}

/// Under 24 hours old: `HH:MM`; under 7 days: weekday; older: `Mon D`.
/// Cutoffs count elapsed time, not calendar days.
pub fn format_chat_date<Tz>(timestamp: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(tz);
    let days = (now - timestamp).num_days();
    if days == 0 {
        local.format("%H:%M").to_string()
    } else if days < 7 {
        local.format("%a").to_string()
    } else {
        local.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Message, Sender};
    use chrono::Duration;

    fn chat(id: &str, messages: &[&str]) -> Chat {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        Chat {
            id: id.into(),
            title: format!("Chat {}", id),
            created_at: at,
            updated_at: at,
            messages: messages
                .iter()
                .enumerate()
                .map(|(idx, content)| Message {
                    id: idx.to_string(),
                    content: content.to_string(),
                    sender: Sender::User,
                    created_at: at,
                    enabled_agents: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn preview_truncates_long_messages() {
        let long = "x".repeat(60);
        let preview_text = preview(&chat("1", &["short", &long])).unwrap();
        assert_eq!(preview_text, format!("{}...", "x".repeat(50)));
        assert_eq!(preview(&chat("1", &["hi"])).as_deref(), Some("hi"));
        assert!(preview(&chat("1", &[])).is_none());
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(50);
        assert_eq!(preview(&chat("1", &[&text])).unwrap(), text);
    }

    #[test]
    fn message_count_is_labelled() {
        assert_eq!(message_count_label(&chat("1", &["a", "b"])), "2 msgs");
    }

    #[test]
    fn dates_use_time_weekday_or_month_day() {
        let now = Utc.with_ymd_and_hms(2024, 3, 12, 18, 30, 0).unwrap();
        let earlier_today = Utc.with_ymd_and_hms(2024, 3, 12, 9, 5, 0).unwrap();
        assert_eq!(format_chat_date(earlier_today, now, &Utc), "09:05");

        let three_days = now - Duration::days(3);
        assert_eq!(format_chat_date(three_days, now, &Utc), "Sat");

        let old = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        assert_eq!(format_chat_date(old, now, &Utc), "Feb 1");
    }

    #[test]
    fn date_cutoffs_follow_elapsed_hours() {
        let now = Utc.with_ymd_and_hms(2024, 3, 12, 8, 0, 0).unwrap();
        let late_yesterday = Utc.with_ymd_and_hms(2024, 3, 11, 22, 15, 0).unwrap();
        assert_eq!(format_chat_date(late_yesterday, now, &Utc), "22:15");

        let just_over_a_day = now - Duration::hours(25);
        assert_eq!(format_chat_date(just_over_a_day, now, &Utc), "Mon");
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut history = ChatHistory::new();
        history.set_chats(vec![chat("1", &[]), chat("2", &[])]);
        history.upsert(chat("2", &["new"]));
        history.upsert(chat("3", &[]));
        assert_eq!(history.chats().len(), 3);
        assert_eq!(history.get("2").unwrap().messages.len(), 1);
    }

    #[test]
    fn set_active_moves_selection() {
        let mut history = ChatHistory::new();
        history.set_chats(vec![chat("1", &[]), chat("2", &[])]);
        history.set_active("2");
        assert_eq!(history.selected_index(), 1);
        assert!(history.is_active(history.selected_chat().unwrap()));
        history.move_selection(-5);
        assert_eq!(history.selected_index(), 0);
    }

    #[test]
    fn local_ids_continue_from_last_chat() {
        let mut history = ChatHistory::new();
        assert_eq!(history.next_local_id(), 1);
        history.upsert(chat("1", &[]));
        history.upsert(chat("2", &[]));
        assert_eq!(history.next_local_id(), 3);
    }
}

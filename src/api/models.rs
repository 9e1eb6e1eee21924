//! Request and response records exchanged with the AgentSwarm backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// The role an agent plays inside the swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    #[default]
    Utility,
    Task,
    Orchestration,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Utility => "utility",
            AgentType::Task => "task",
            AgentType::Orchestration => "orchestration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentType::Utility => "Utility",
            AgentType::Task => "Task",
            AgentType::Orchestration => "Orchestration",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AgentType::Utility => AgentType::Task,
            AgentType::Task => AgentType::Orchestration,
            AgentType::Orchestration => AgentType::Utility,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            AgentType::Utility => AgentType::Orchestration,
            AgentType::Task => AgentType::Utility,
            AgentType::Orchestration => AgentType::Task,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpConnectionInfo {
    pub endpoint_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// AI provider settings attached to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_id: String,
    pub provider_type: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_providers: Vec<String>,
}

/// Body of `POST /agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    pub agent_type: AgentType,
    pub description: String,
    pub mcp_connection: McpConnectionInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<ProviderConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub agent_type: AgentType,
    pub description: String,
    pub mcp_connection: McpConnectionInfo,
    #[serde(default)]
    pub provider_config: Option<ProviderConfig>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub enabled_agents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Chat {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Body of `POST /chats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Body of `POST /chats/:id/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub content: String,
    pub enabled_agents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub provider_id: String,
    pub provider_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderList {
    pub providers: Vec<ProviderInfo>,
    #[serde(default)]
    pub total: usize,
}

/// Timestamps arrive either as RFC 3339 or as naive ISO 8601 strings in UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")?;
        Ok(Utc.from_utc_datetime(&naive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn agent_type_cycles_through_all_variants() {
        let mut kind = AgentType::default();
        assert_eq!(kind, AgentType::Utility);
        kind = kind.next();
        assert_eq!(kind, AgentType::Task);
        kind = kind.next();
        assert_eq!(kind, AgentType::Orchestration);
        assert_eq!(kind.next(), AgentType::Utility);
        assert_eq!(AgentType::Utility.previous(), AgentType::Orchestration);
    }

    #[test]
    fn draft_omits_empty_optional_sections() {
        let draft = AgentDraft {
            name: "indexer".into(),
            agent_type: AgentType::Task,
            description: "Indexes documents".into(),
            mcp_connection: McpConnectionInfo {
                endpoint_url: "http://localhost:8080/mcp".into(),
                metadata: None,
            },
            provider_config: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "indexer",
                "agent_type": "task",
                "description": "Indexes documents",
                "mcp_connection": { "endpoint_url": "http://localhost:8080/mcp" }
            })
        );
    }

    #[test]
    fn agent_accepts_naive_backend_timestamps() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "a-1",
            "name": "scraper",
            "agent_type": "utility",
            "description": "Fetches pages",
            "mcp_connection": { "endpoint_url": "http://localhost:9000", "metadata": null },
            "created_at": "2024-03-05T14:07:09.123456"
        }))
        .unwrap();
        assert_eq!(agent.created_at.year(), 2024);
        assert_eq!(agent.created_at.hour(), 14);
        assert!(agent.provider_config.is_none());
        assert!(agent.mcp_connection.metadata.is_none());
    }

    #[test]
    fn chat_accepts_offset_timestamps_and_missing_messages() {
        let chat: Chat = serde_json::from_value(json!({
            "id": "c-1",
            "title": "Planning",
            "created_at": "2024-03-05T14:07:09+02:00",
            "updated_at": "2024-03-05T15:00:00Z"
        }))
        .unwrap();
        assert_eq!(chat.created_at.hour(), 12);
        assert!(chat.messages.is_empty());
        assert!(chat.last_message().is_none());
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!(timestamp::parse("yesterday").is_err());
    }
}

use serde_json::Value;

use crate::api::models::{AgentDraft, AgentType, McpConnectionInfo, ProviderConfig, ProviderInfo};

use super::input::TextInput;

pub const FORM_TITLE: &str = "Create New Agent";
pub const SUBMIT_LABEL: &str = "Create Agent";
pub const SUBMITTING_LABEL: &str = "Creating Agent...";
pub const METADATA_HINT: &str = "Enter valid JSON for additional MCP connection metadata";

/// Why a form could not be turned into an `AgentDraft`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Invalid JSON in metadata field")]
    InvalidMetadata,
}

/// The form's fields in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    AgentType,
    Description,
    EndpointUrl,
    Metadata,
    ProviderId,
    ProviderType,
    Model,
    FallbackProviders,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::AgentType,
        FormField::Description,
        FormField::EndpointUrl,
        FormField::Metadata,
        FormField::ProviderId,
        FormField::ProviderType,
        FormField::Model,
        FormField::FallbackProviders,
        FormField::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Agent Name *",
            FormField::AgentType => "Agent Type *",
            FormField::Description => "Description *",
            FormField::EndpointUrl => "MCP Endpoint URL *",
            FormField::Metadata => "MCP Metadata (JSON, optional)",
            FormField::ProviderId => "AI Provider (optional)",
            FormField::ProviderType => "Provider Type",
            FormField::Model => "Model",
            FormField::FallbackProviders => "Fallback Providers",
            FormField::Submit => "",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "Enter agent name",
            FormField::Description => "Describe the agent's purpose and capabilities",
            FormField::EndpointUrl => "http://localhost:8080/mcp",
            FormField::Metadata => r#"{"version": "1.0", "protocol": "http"}"#,
            FormField::ProviderId => "openai-main",
            FormField::ProviderType => "openai",
            FormField::Model => "gpt-4o-mini",
            FormField::FallbackProviders => "comma separated provider ids",
            FormField::AgentType | FormField::Submit => "",
        }
    }

    /// Fields whose value may span several lines.
    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::Description | FormField::Metadata)
    }

    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|field| field == self)
            .unwrap_or(0)
    }
}

/// State of the agent creation form.
#[derive(Debug, Clone, Default)]
pub struct AgentForm {
    name: TextInput,
    agent_type: AgentType,
    description: TextInput,
    endpoint_url: TextInput,
    metadata: TextInput,
    provider_id: TextInput,
    provider_type: TextInput,
    model: TextInput,
    fallback_providers: TextInput,
    focused: usize,
    submitting: bool,
}

impl AgentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focused]
    }

    pub fn focus(&mut self, field: FormField) {
        self.focused = field.index();
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % FormField::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        let len = FormField::ALL.len();
        self.focused = (self.focused + len - 1) % len;
    }

    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    pub fn set_agent_type(&mut self, agent_type: AgentType) {
        if !self.submitting {
            self.agent_type = agent_type;
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Display value of a field.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::AgentType => self.agent_type.label(),
            FormField::Submit => self.submit_label(),
            other => self.input(other).map(TextInput::value).unwrap_or_default(),
        }
    }

    /// The text input behind the focused field, if it is a text field.
    pub fn focused_input(&self) -> Option<&TextInput> {
        self.input(self.focused())
    }

    fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::Description => Some(&self.description),
            FormField::EndpointUrl => Some(&self.endpoint_url),
            FormField::Metadata => Some(&self.metadata),
            FormField::ProviderId => Some(&self.provider_id),
            FormField::ProviderType => Some(&self.provider_type),
            FormField::Model => Some(&self.model),
            FormField::FallbackProviders => Some(&self.fallback_providers),
            FormField::AgentType | FormField::Submit => None,
        }
    }

    fn input_mut(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Description => Some(&mut self.description),
            FormField::EndpointUrl => Some(&mut self.endpoint_url),
            FormField::Metadata => Some(&mut self.metadata),
            FormField::ProviderId => Some(&mut self.provider_id),
            FormField::ProviderType => Some(&mut self.provider_type),
            FormField::Model => Some(&mut self.model),
            FormField::FallbackProviders => Some(&mut self.fallback_providers),
            FormField::AgentType | FormField::Submit => None,
        }
    }

    /// Applies `edit` to the focused text input. Input is ignored while a
    /// submission is in flight.
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut TextInput)) {
        if self.submitting {
            return;
        }
        let field = self.focused();
        if let Some(input) = self.input_mut(field) {
            edit(input);
        }
    }

    pub fn set_value(&mut self, field: FormField, value: &str) {
        if let Some(input) = self.input_mut(field) {
            input.set(value);
        }
    }

    /// Copies a backend provider into the provider fields.
    pub fn apply_provider(&mut self, provider: &ProviderInfo) {
        self.provider_id.set(provider.provider_id.clone());
        self.provider_type.set(provider.provider_type.clone());
        if let Some(model) = &provider.default_model {
            self.model.set(model.clone());
        }
    }

    /// Validates the fields and builds the request body.
    pub fn build_draft(&self) -> Result<AgentDraft, FormError> {
        let name = required(&self.name, FormField::Name)?;
        let description = required(&self.description, FormField::Description)?;
        let endpoint_url = required(&self.endpoint_url, FormField::EndpointUrl)?;
        let metadata = parse_metadata(self.metadata.value())?;
        let provider_config = self.provider_config()?;

        Ok(AgentDraft {
            name,
            agent_type: self.agent_type,
            description,
            mcp_connection: McpConnectionInfo {
                endpoint_url,
                metadata,
            },
            provider_config,
        })
    }

    fn provider_config(&self) -> Result<Option<ProviderConfig>, FormError> {
        let provider_id = self.provider_id.value().trim();
        if provider_id.is_empty() {
            return Ok(None);
        }
        let provider_type = required(&self.provider_type, FormField::ProviderType)?;
        let model = required(&self.model, FormField::Model)?;
        let fallback_providers = self
            .fallback_providers
            .value()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
        Ok(Some(ProviderConfig {
            provider_id: provider_id.to_string(),
            provider_type,
            model,
            fallback_providers,
        }))
    }

    /// Validates and marks the form as submitting. Returns `None` when a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<Result<AgentDraft, FormError>> {
        if self.submitting {
            return None;
        }
        let draft = self.build_draft();
        if draft.is_ok() {
            self.submitting = true;
        }
        Some(draft)
    }

    /// Ends a submission; the fields are cleared only when the backend accepted it.
    pub fn finish_submit(&mut self, created: bool) {
        self.submitting = false;
        if created {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            focused: self.focused,
            ..Self::default()
        };
    }
}

fn required(input: &TextInput, field: FormField) -> Result<String, FormError> {
    let value = input.value().trim();
    if value.is_empty() {
        Err(FormError::Missing(field.label().trim_end_matches(" *")))
    } else {
        Ok(value.to_string())
    }
}

/// Blank text means no metadata, as does an empty object.
fn parse_metadata(raw: &str) -> Result<Option<serde_json::Map<String, Value>>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) if map.is_empty() => Ok(None),
        Ok(Value::Object(map)) => Ok(Some(map)),
        _ => Err(FormError::InvalidMetadata),
    }
}

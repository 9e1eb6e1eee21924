//! Editable input state: the shared text input and the agent creation form.

pub mod agent_form;
pub mod input;

pub use agent_form::{AgentForm, FormError, FormField};
pub use input::TextInput;

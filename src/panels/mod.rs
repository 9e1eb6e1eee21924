//! View state for each region of the screen. Nothing here touches the
//! network or the terminal; `app` drives these and `ui` draws them.

pub mod agents;
pub mod chat;
pub mod chats;
pub mod health;

pub use agents::{AgentPanel, Banner, BannerKind};
pub use chat::ChatWindow;
pub use chats::ChatHistory;
pub use health::HealthState;

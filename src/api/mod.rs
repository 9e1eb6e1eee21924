//! Client side of the AgentSwarm REST API.
//!
//! `client` holds the `SwarmApi` trait and its `reqwest` implementation,
//! `dispatch` runs calls in the background and feeds results back to the UI,
//! `models` mirrors the backend's JSON records.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{HttpSwarmApi, SwarmApi};
pub use dispatch::{ApiEvent, ApiRequest, SwarmDispatcher};
pub use error::ApiError;

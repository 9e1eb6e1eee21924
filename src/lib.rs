//! Terminal client for the AgentSwarm backend: agent management, agent
//! selection and chat over the backend's REST API.

pub mod api;
pub mod app;
pub mod config;
pub mod event;
pub mod forms;
pub mod logging;
pub mod panels;
pub mod tui;
pub mod ui;

pub mod app;
pub mod backend;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod state;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Focus, Phase};
pub use backend::ChatBackend;
pub use client::{AgentClient, AgentRequest};
pub use config::{Config, Settings};
pub use error::TransportError;
pub use state::{ChatMessage, ChatRole};

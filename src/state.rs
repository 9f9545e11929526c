//! UI-agnostic conversation types
//!
//! Shared by the controller, the renderer and the one-shot CLI commands; none
//! of these depend on the terminal.

/// Agent selected until the backend tells us otherwise.
pub const DEFAULT_AGENT: &str = "default";

/// Label shown for the unset model selection.
pub const DEFAULT_MODEL_LABEL: &str = "Default";

pub const CONNECTION_ERROR: &str =
    "Error connecting to Fast Agent backend. Make sure the API is running.";

pub const SEND_ERROR: &str = "Error processing request. Check the console for details.";

/// A transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "You:",
            ChatRole::Assistant => "Agent:",
            ChatRole::System => "System:",
        }
    }
}

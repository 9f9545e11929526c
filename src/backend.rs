use futures_util::future::BoxFuture;

use crate::client::{AgentClient, AgentRequest};
use crate::error::TransportError;

/// The three remote operations the chat view depends on.
///
/// `AgentClient` is the real implementation; tests swap in an in-memory one.
pub trait ChatBackend: Send + Sync {
    fn agents(&self) -> BoxFuture<'_, Result<Vec<String>, TransportError>>;
    fn models(&self) -> BoxFuture<'_, Result<Vec<String>, TransportError>>;
    fn send(&self, request: AgentRequest) -> BoxFuture<'_, Result<String, TransportError>>;
}

impl ChatBackend for AgentClient {
    fn agents(&self) -> BoxFuture<'_, Result<Vec<String>, TransportError>> {
        Box::pin(self.list_agents())
    }

    fn models(&self) -> BoxFuture<'_, Result<Vec<String>, TransportError>> {
        Box::pin(self.list_models())
    }

    fn send(&self, request: AgentRequest) -> BoxFuture<'_, Result<String, TransportError>> {
        Box::pin(async move { self.send_message(&request).await })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;

    use super::*;

    /// Scripted backend. `None` in any slot makes that call fail.
    pub struct FakeBackend {
        pub agents: Option<Vec<String>>,
        pub models: Option<Vec<String>>,
        pub reply: Option<String>,
        pub sent: Mutex<Vec<AgentRequest>>,
        pub calls: Mutex<Vec<&'static str>>,
        pub gate: Option<Arc<Notify>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self {
                agents: Some(vec!["default".to_string(), "coder".to_string()]),
                models: Some(vec!["gpt-4".to_string()]),
                reply: Some("hi there".to_string()),
                sent: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        pub fn offline() -> Self {
            Self {
                agents: None,
                models: None,
                reply: None,
                ..Self::new()
            }
        }

        /// Hold `send` until the returned handle is notified.
        pub fn gated(mut self) -> (Self, Arc<Notify>) {
            let gate = Arc::new(Notify::new());
            self.gate = Some(gate.clone());
            (self, gate)
        }

        pub fn sent(&self) -> Vec<AgentRequest> {
            self.sent.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn offline(operation: &'static str) -> TransportError {
        TransportError::new(operation, "connection refused")
    }

    impl ChatBackend for FakeBackend {
        fn agents(&self) -> BoxFuture<'_, Result<Vec<String>, TransportError>> {
            self.record("agents");
            Box::pin(async move { self.agents.clone().ok_or_else(|| offline("list agents")) })
        }

        fn models(&self) -> BoxFuture<'_, Result<Vec<String>, TransportError>> {
            self.record("models");
            Box::pin(async move { self.models.clone().ok_or_else(|| offline("list models")) })
        }

        fn send(&self, request: AgentRequest) -> BoxFuture<'_, Result<String, TransportError>> {
            self.record("send");
            self.sent.lock().unwrap().push(request);
            Box::pin(async move {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                self.reply.clone().ok_or_else(|| offline("send message"))
            })
        }
    }
}

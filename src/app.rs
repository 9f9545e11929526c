use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::backend::ChatBackend;
use crate::client::AgentRequest;
use crate::error::TransportError;
use crate::state::{ChatMessage, ChatRole, CONNECTION_ERROR, DEFAULT_MODEL_LABEL, SEND_ERROR};

type Pending<T> = Option<JoinHandle<Result<T, TransportError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Agent,
    Model,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Agent,
            Focus::Agent => Focus::Model,
            Focus::Model => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Model,
            Focus::Agent => Focus::Input,
            Focus::Model => Focus::Agent,
        }
    }
}

/// Where the chat view is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingInitialData,
    Composing,
    Submitting,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub focus: Focus,

    // Compose form
    pub draft: String,
    pub cursor: usize, // cursor position in draft, in chars

    // Selections
    pub agents: Vec<String>,
    pub models: Vec<String>,
    pub selected_agent: String,
    pub selected_model: Option<String>, // None = backend default

    // Conversation
    pub transcript: Vec<ChatMessage>,
    pub loading: bool,

    // Transcript viewport (updated during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub chat_lines: u16, // wrapped transcript height
    pub follow_transcript: bool,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    backend: Arc<dyn ChatBackend>,
    mounted: bool,
    connection_error_reported: bool,
    agents_task: Pending<Vec<String>>,
    models_task: Pending<Vec<String>>,
    send_task: Pending<String>,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, agent: &str) -> Self {
        Self {
            should_quit: false,
            focus: Focus::default(),

            draft: String::new(),
            cursor: 0,

            agents: Vec::new(),
            models: Vec::new(),
            selected_agent: agent.to_string(),
            selected_model: None,

            transcript: Vec::new(),
            loading: false,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            chat_lines: 0,
            follow_transcript: true,

            animation_frame: 0,

            backend,
            mounted: false,
            connection_error_reported: false,
            agents_task: None,
            models_task: None,
            send_task: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.agents_task.is_some() || self.models_task.is_some() {
            Phase::AwaitingInitialData
        } else if self.mounted {
            Phase::Composing
        } else {
            Phase::Idle
        }
    }

    /// Kick off both list calls. They run side by side and each only
    /// touches its own list when it lands.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::info!(agent = %self.selected_agent, "loading agents and models");

        let backend = self.backend.clone();
        self.agents_task = Some(tokio::spawn(async move { backend.agents().await }));

        let backend = self.backend.clone();
        self.models_task = Some(tokio::spawn(async move { backend.models().await }));
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    /// Submit the draft. Returns false when the guard rejects it.
    pub fn submit(&mut self) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };

        let backend = self.backend.clone();
        self.send_task = Some(tokio::spawn(async move { backend.send(request).await }));
        true
    }

    /// Synchronous half of a submit: the user entry is in the transcript
    /// before the call goes out.
    fn begin_submit(&mut self) -> Option<AgentRequest> {
        if !self.can_submit() {
            return None;
        }

        let draft = std::mem::take(&mut self.draft);
        self.cursor = 0;

        let request = AgentRequest {
            message: draft.trim().to_string(),
            agent: Some(self.selected_agent.clone()),
            model: self.selected_model.clone(),
        };

        self.push_entry(ChatMessage::user(draft));
        self.loading = true;
        tracing::info!(
            agent = %self.selected_agent,
            model = self.selected_model.as_deref().unwrap_or(DEFAULT_MODEL_LABEL),
            "submitting message"
        );

        Some(request)
    }

    pub fn apply_agents(&mut self, result: Result<Vec<String>, TransportError>) {
        match result {
            Ok(agents) => {
                tracing::info!(count = agents.len(), "agents loaded");
                self.agents = agents;
            }
            Err(err) => self.report_connection_error(&err),
        }
    }

    pub fn apply_models(&mut self, result: Result<Vec<String>, TransportError>) {
        match result {
            Ok(models) => {
                tracing::info!(count = models.len(), "models loaded");
                self.models = models;
                self.selected_model = None;
            }
            Err(err) => self.report_connection_error(&err),
        }
    }

    pub fn finish_send(&mut self, result: Result<String, TransportError>) {
        match result {
            Ok(response) => self.push_entry(ChatMessage::assistant(response)),
            Err(err) => {
                tracing::error!(error = %err, "Error processing request");
                self.push_entry(ChatMessage::system(SEND_ERROR));
            }
        }
        self.loading = false;
    }

    // Both loads may fail; the user only needs to hear about it once.
    fn report_connection_error(&mut self, err: &TransportError) {
        tracing::error!(error = %err, "Error fetching initial data");
        if !self.connection_error_reported {
            self.connection_error_reported = true;
            self.push_entry(ChatMessage::system(CONNECTION_ERROR));
        }
    }

    fn push_entry(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.follow_transcript = true;
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.agents_task.is_some() || self.models_task.is_some() || self.send_task.is_some()
    }

    /// Fold in the results of any finished tasks without blocking on the
    /// rest. Called once per UI event.
    pub async fn poll_tasks(&mut self) {
        if let Some(result) = take_finished(&mut self.agents_task, "list agents").await {
            self.apply_agents(result);
        }
        if let Some(result) = take_finished(&mut self.models_task, "list models").await {
            self.apply_models(result);
        }
        if let Some(result) = take_finished(&mut self.send_task, "send message").await {
            self.finish_send(result);
        }
    }

    /// Wait for every outstanding task and fold its result.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.agents_task.take() {
            let result = join(handle, "list agents").await;
            self.apply_agents(result);
        }
        if let Some(handle) = self.models_task.take() {
            let result = join(handle, "list models").await;
            self.apply_models(result);
        }
        if let Some(handle) = self.send_task.take() {
            let result = join(handle, "send message").await;
            self.finish_send(result);
        }
    }

    /// Abort whatever is still in flight; late results are dropped.
    pub fn shutdown(&mut self) {
        for handle in [self.agents_task.take(), self.models_task.take()].into_iter().flatten() {
            handle.abort();
        }
        if let Some(handle) = self.send_task.take() {
            tracing::warn!("aborting in-flight message on shutdown");
            handle.abort();
        }
    }

    // Selection helpers
    pub fn agent_index(&self) -> Option<usize> {
        self.agents.iter().position(|a| a == &self.selected_agent)
    }

    pub fn next_agent(&mut self) {
        if self.agents.is_empty() {
            return;
        }
        let i = match self.agent_index() {
            Some(i) => (i + 1).min(self.agents.len() - 1),
            None => 0,
        };
        self.selected_agent = self.agents[i].clone();
    }

    pub fn prev_agent(&mut self) {
        if self.agents.is_empty() {
            return;
        }
        let i = self.agent_index().map_or(0, |i| i.saturating_sub(1));
        self.selected_agent = self.agents[i].clone();
    }

    /// Model options as displayed: the unset entry first, then the list.
    pub fn model_options(&self) -> Vec<&str> {
        std::iter::once(DEFAULT_MODEL_LABEL)
            .chain(self.models.iter().map(String::as_str))
            .collect()
    }

    /// Index into `model_options`.
    pub fn model_index(&self) -> usize {
        self.selected_model
            .as_ref()
            .and_then(|m| self.models.iter().position(|x| x == m))
            .map_or(0, |i| i + 1)
    }

    pub fn next_model(&mut self) {
        let i = (self.model_index() + 1).min(self.models.len());
        self.select_model_option(i);
    }

    pub fn prev_model(&mut self) {
        let i = self.model_index().saturating_sub(1);
        self.select_model_option(i);
    }

    fn select_model_option(&mut self, i: usize) {
        self.selected_model = match i {
            0 => None,
            _ => self.models.get(i - 1).cloned(),
        };
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Record the wrapped height of the transcript as last drawn, then
    /// keep the viewport pinned to the tail or inside the new bounds.
    pub fn set_rendered_lines(&mut self, lines: usize) {
        self.chat_lines = u16::try_from(lines).unwrap_or(u16::MAX);
        if self.follow_transcript {
            self.scroll_to_bottom();
        } else {
            self.chat_scroll = self.chat_scroll.min(self.max_scroll());
        }
    }

    fn max_scroll(&self) -> u16 {
        let visible_height = if self.chat_height > 0 { self.chat_height } else { 20 };
        self.chat_lines.saturating_sub(visible_height)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = self.max_scroll();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
        self.follow_transcript = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.max_scroll();
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
        self.follow_transcript = self.chat_scroll >= max;
    }

    pub fn last_entry_role(&self) -> Option<ChatRole> {
        self.transcript.last().map(|m| m.role)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn take_finished<T>(
    slot: &mut Pending<T>,
    operation: &'static str,
) -> Option<Result<T, TransportError>> {
    if !slot.as_ref().is_some_and(JoinHandle::is_finished) {
        return None;
    }
    let handle = slot.take()?;
    Some(join(handle, operation).await)
}

async fn join<T>(
    handle: JoinHandle<Result<T, TransportError>>,
    operation: &'static str,
) -> Result<T, TransportError> {
    match handle.await {
        Ok(result) => result,
        Err(err) => Err(TransportError::new(operation, err)),
    }
}

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Body of `POST /agent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Deserialize)]
struct AgentResponse {
    response: String,
}

#[derive(Deserialize)]
struct AgentsResponse {
    agents: Vec<String>,
}

#[derive(Deserialize)]
struct ModelsResponse {
    models: Vec<String>,
}

/// HTTP client for a Fast Agent backend.
///
/// Every call is a fresh round trip: nothing is cached, retried or timed out
/// beyond what reqwest does on its own.
#[derive(Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_agents(&self) -> Result<Vec<String>, TransportError> {
        let url = format!("{}/agents", self.base_url);
        tracing::debug!(%url, "fetching agents");

        match self.get_json::<AgentsResponse>(&url).await {
            Ok(body) => Ok(body.agents),
            Err(err) => {
                let err = TransportError::new("list agents", err);
                tracing::error!(error = %err, "Error fetching agents");
                Err(err)
            }
        }
    }

    pub async fn list_models(&self) -> Result<Vec<String>, TransportError> {
        let url = format!("{}/models", self.base_url);
        tracing::debug!(%url, "fetching models");

        match self.get_json::<ModelsResponse>(&url).await {
            Ok(body) => Ok(body.models),
            Err(err) => {
                let err = TransportError::new("list models", err);
                tracing::error!(error = %err, "Error fetching models");
                Err(err)
            }
        }
    }

    pub async fn send_message(&self, request: &AgentRequest) -> Result<String, TransportError> {
        let url = format!("{}/agent", self.base_url);
        tracing::debug!(
            %url,
            agent = request.agent.as_deref().unwrap_or("<unset>"),
            model = request.model.as_deref().unwrap_or("<unset>"),
            "sending message to agent"
        );

        match self.post_json::<_, AgentResponse>(&url, request).await {
            Ok(body) => Ok(body.response),
            Err(err) => {
                let err = TransportError::new("send message", err);
                tracing::error!(error = %err, "Error sending message to agent");
                Err(err)
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> reqwest::Result<T> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.json::<T>().await
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> reqwest::Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        response.json::<T>().await
    }
}

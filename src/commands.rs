//! One-shot commands behind the `agents`, `models`, `send` and `config`
//! subcommands. Backend failures print a hint and come back as errors so
//! the process exits non-zero.

use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::client::{AgentClient, AgentRequest};
use crate::config::{Config, Settings};
use crate::error::TransportError;

pub async fn list_agents(settings: &Settings) -> Result<Vec<String>> {
    let client = AgentClient::new(&settings.base_url);

    println!("\n{}", "🤖 Available Agents".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    let agents = client
        .list_agents()
        .await
        .map_err(|e| connection_failed(&settings.base_url, e))?;

    if agents.is_empty() {
        println!("{}", "No agents found.".yellow());
    }
    for agent in &agents {
        if *agent == settings.agent {
            println!("  • {} {}", agent.green().bold(), "(selected)".dimmed());
        } else {
            println!("  • {}", agent.green());
        }
    }

    Ok(agents)
}

pub async fn list_models(settings: &Settings) -> Result<Vec<String>> {
    let client = AgentClient::new(&settings.base_url);

    println!("\n{}", "🧠 Available Models".bold().blue());
    println!("{}", "=".repeat(30).dimmed());

    let models = client
        .list_models()
        .await
        .map_err(|e| connection_failed(&settings.base_url, e))?;

    println!("  • {} {}", "Default".green(), "(backend default)".dimmed());
    for model in &models {
        println!("  • {}", model.green());
    }

    Ok(models)
}

/// Send one message. A blank message is skipped and yields `None`.
pub async fn send_once(
    settings: &Settings,
    message: &str,
    model: Option<String>,
) -> Result<Option<String>> {
    let message = message.trim();
    if message.is_empty() {
        println!("{}", "Nothing to send.".yellow());
        return Ok(None);
    }

    let client = AgentClient::new(&settings.base_url);
    let request = AgentRequest {
        message: message.to_string(),
        agent: Some(settings.agent.clone()),
        model: model.filter(|m| !m.is_empty()),
    };

    let response = client
        .send_message(&request)
        .await
        .map_err(|e| connection_failed(&settings.base_url, e))?;

    println!("{}", format!("{}:", settings.agent).bold().yellow());
    println!("{}", response);
    Ok(Some(response))
}

pub fn save_config(
    mut config: Config,
    url: Option<String>,
    agent: Option<String>,
    path: &Path,
) -> Result<Settings> {
    if url.is_some() {
        config.base_url = url;
    }
    if agent.is_some() {
        config.default_agent = agent;
    }

    config.save_to(path)?;
    let settings = config.resolve(None, None, None);

    println!("{} {}", "Saved".green(), path.display().to_string().dimmed());
    println!("  url:   {}", settings.base_url);
    println!("  agent: {}", settings.agent);
    Ok(settings)
}

fn connection_failed(base_url: &str, err: TransportError) -> anyhow::Error {
    eprintln!("Make sure the API is running at {}", base_url.bold());
    anyhow::Error::new(err).context("Error talking to Fast Agent backend")
}

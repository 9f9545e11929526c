use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

use fastagent_tui::config::URL_ENV_VAR;
use fastagent_tui::{commands, handler, logging, tui, ui};
use fastagent_tui::{AgentClient, App, Config, Settings};

#[derive(Parser)]
#[command(name = "fastagent")]
#[command(about = "Chat with Fast Agent agents from the terminal")]
#[command(version)]
struct Cli {
    /// Backend base URL (falls back to FASTAGENT_URL, the config file, then http://localhost:8000)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Agent to talk to
    #[arg(long, global = true)]
    agent: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// List agents exposed by the backend
    Agents,
    /// List models exposed by the backend
    Models,
    /// Send a single message and print the response
    Send {
        /// Message text
        message: String,
        /// Model to use instead of the backend default
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Save the backend URL and/or default agent to the config file
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; a read-only home should not stop the chat
    if let Err(err) = logging::init() {
        eprintln!("{}: {}", "Logging disabled".yellow(), err);
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not read config, using defaults");
        Config::new()
    });
    let env_url = std::env::var(URL_ENV_VAR).ok();
    let settings =
        config.resolve(cli.url.as_deref(), env_url.as_deref(), cli.agent.as_deref());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&settings).await?,
        Commands::Agents => {
            commands::list_agents(&settings).await?;
        }
        Commands::Models => {
            commands::list_models(&settings).await?;
        }
        Commands::Send { message, model } => {
            commands::send_once(&settings, &message, model).await?;
        }
        Commands::Config => {
            let path = Config::get_config_path()?;
            commands::save_config(config, cli.url, cli.agent, &path)?;
        }
    }

    Ok(())
}

async fn run_chat(settings: &Settings) -> Result<()> {
    tracing::info!(url = %settings.base_url, agent = %settings.agent, "starting chat");

    let client = AgentClient::new(&settings.base_url);
    let mut app = App::new(Arc::new(client), &settings.agent);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    app.mount();

    let result: Result<()> = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            }

            app.poll_tasks().await;
        }
        Ok(())
    }
    .await;

    app.shutdown();
    tui::restore()?;
    result
}

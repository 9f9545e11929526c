use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_BASE_URL;
use crate::state::DEFAULT_AGENT;

pub const URL_ENV_VAR: &str = "FASTAGENT_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub base_url: Option<String>,
    pub default_agent: Option<String>,
}

/// Settings after CLI flags, environment and config file are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub agent: String,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Merge with overrides; `url`/`agent` come from the command line and
    /// `env_url` from `FASTAGENT_URL`.
    pub fn resolve(
        &self,
        url: Option<&str>,
        env_url: Option<&str>,
        agent: Option<&str>,
    ) -> Settings {
        let base_url = url
            .or(env_url)
            .or(self.base_url.as_deref())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string();

        let agent = agent
            .or(self.default_agent.as_deref())
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(DEFAULT_AGENT)
            .to_string();

        Settings { base_url, agent }
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("fastagent").join("config.json"))
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub hostaway: HostawayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HostawayConfig {
    /// When true (the default), reviews come from the local mock fixture
    /// instead of the Hostaway API.
    #[serde(default = "default_true")]
    pub use_mock_data: bool,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_api_base() -> String {
    "https://api.hostaway.com/v1".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for HostawayConfig {
    fn default() -> Self {
        Self {
            use_mock_data: default_true(),
            api_base: default_api_base(),
            account_id: String::new(),
            api_key: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            hostaway: HostawayConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    /// (mock mode needs no configuration at all).
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.bind_addr.is_empty() {
            return Err(anyhow::anyhow!("server.bind_addr cannot be empty"));
        }

        if !self.hostaway.use_mock_data {
            if self.hostaway.api_base.is_empty() {
                return Err(anyhow::anyhow!(
                    "Hostaway API mode is enabled but api_base is not configured"
                ));
            }
            if self.hostaway.account_id.is_empty() {
                return Err(anyhow::anyhow!(
                    "Hostaway API mode is enabled but account_id is not configured"
                ));
            }
            if self.hostaway.api_key.is_empty() || self.hostaway.api_key == "YOUR_API_KEY" {
                return Err(anyhow::anyhow!(
                    "Hostaway API mode is enabled but api_key is not configured"
                ));
            }
        }

        Ok(())
    }

    pub fn is_hostaway_configured(&self) -> bool {
        !self.hostaway.account_id.is_empty()
            && !self.hostaway.api_key.is_empty()
            && self.hostaway.api_key != "YOUR_API_KEY"
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Backing service connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Org unit tree rendering
    #[serde(default)]
    pub tree: TreeConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the governance service (e.g., "http://localhost:8090")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeConfig {
    /// Deepest level the traversal descends to before truncating a branch
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Total nodes rendered across the forest; densely cross-linked units
    /// otherwise expand to one node per distinct path
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_depth() -> usize {
    64
}

fn default_max_nodes() -> usize {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be > 0");
        }
        if self.tree.max_depth == 0 {
            anyhow::bail!("tree.max_depth must be >= 1");
        }
        if self.tree.max_nodes == 0 {
            anyhow::bail!("tree.max_nodes must be >= 1");
        }
        Ok(())
    }
}

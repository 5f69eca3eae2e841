use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::release::DEFAULT_RELEASE_PATTERN;
use crate::domain::ReleaseBranchPattern;
use crate::error::{PluginRefError, Result};

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "pluginref.toml";

/// Name of the config file looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".pluginref.toml";

/// Represents the complete configuration for get-plugin-ref.
///
/// Contains the hosting API settings and the release branch naming rule.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub branches: BranchesConfig,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("get-plugin-ref/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    20
}

/// Settings for talking to the GitHub REST API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_release_pattern() -> String {
    DEFAULT_RELEASE_PATTERN.to_string()
}

/// Branch naming configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_release_pattern")]
    pub release_pattern: String,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            release_pattern: default_release_pattern(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.github.per_page) {
            return Err(PluginRefError::config(format!(
                "github.per_page must be between 1 and 100, got {}",
                self.github.per_page
            )));
        }
        if self.github.max_pages == 0 {
            return Err(PluginRefError::config("github.max_pages must be at least 1"));
        }
        if self.github.timeout_secs == 0 {
            return Err(PluginRefError::config(
                "github.timeout_secs must be at least 1",
            ));
        }
        if self.github.api_url.trim().is_empty() {
            return Err(PluginRefError::config("github.api_url must not be empty"));
        }
        self.release_pattern()?;
        Ok(())
    }

    /// The release branch pattern as a domain value
    pub fn release_pattern(&self) -> Result<ReleaseBranchPattern> {
        ReleaseBranchPattern::new(self.branches.release_pattern.clone())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pluginref.toml` in current directory
/// 3. `.pluginref.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml_str(&config_str)
}

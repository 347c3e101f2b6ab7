use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use wikibot_core::AnchorSearch;
use wikibot_tools::WikiConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub wiki: WikiConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MatchingConfig {
    /// `first` keeps the classic greedy stop at the first anchor word,
    /// `last` stops at the last one.
    #[serde(default)]
    pub anchor_search: AnchorSearch,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_welcome")]
    pub welcome: String,
    #[serde(default = "SessionConfig::default_prompt")]
    pub prompt: String,
    #[serde(default = "SessionConfig::default_farewell")]
    pub farewell: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome: Self::default_welcome(),
            prompt: Self::default_prompt(),
            farewell: Self::default_farewell(),
        }
    }
}

impl SessionConfig {
    fn default_welcome() -> String {
        "Welcome to the wiki database!".to_string()
    }

    fn default_prompt() -> String {
        "Your query? ".to_string()
    }

    fn default_farewell() -> String {
        "So long!".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset, e.g. `warn` or `wikibot_core=debug`.
    #[serde(default = "LogConfig::default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LogConfig {
    fn default_level() -> String {
        "warn".to_string()
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("wikibot"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load the config file, or `None` when it has not been created yet.
    pub fn load() -> anyhow::Result<Option<Self>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(None);
        }

        Self::from_path(&config_path).map(Some)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        debug!("Loaded config from {}", path.display());

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - wiki.api_url: MediaWiki API endpoint to query");
        println!("   - wiki.auto_suggest: resolve lowercase subjects through search");
        println!("   - matching.anchor_search: \"first\" (classic) or \"last\"");
        println!("   - log.level: log filter when RUST_LOG is unset");
        println!();
        Ok(())
    }

    /// Write the default configuration to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, template)?;
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::render::DEFAULT_TEMPLATE;

/// Overrides `base_url` when set
pub const URL_ENV_VAR: &str = "CANDLE_BOARD_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Candle board configuration.
///
/// The poll interval is deliberately absent: it is fixed at 5 seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Server that serves `/api/data`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Id of the element the tables are rendered into
    #[serde(default = "default_container_id")]
    pub container_id: String,

    /// Where the headless board writes its HTML page
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Page template; the built-in page is used when unset
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    /// Per-request timeout; requests never time out when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_container_id() -> String {
    "data-table".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("board/index.html")
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            container_id: default_container_id(),
            output_path: default_output_path(),
            template_path: None,
            request_timeout_secs: None,
        }
    }
}

impl BoardConfig {
    /// Load configuration from a YAML file, then apply environment overrides
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml_str(&yaml_content)?;

        config.apply_url_override(std::env::var(URL_ENV_VAR).ok());
        config.validate()?;

        Ok(config)
    }

    /// Like [`BoardConfig::load`], but a missing file means defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();

        if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            return Self::load(config_path);
        }

        warn!(
            "Config file {} not found, using defaults",
            config_path.display()
        );
        let mut config = Self::default();
        config.apply_url_override(std::env::var(URL_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.container_id.is_empty()
            || self
                .container_id
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == '\'')
        {
            return Err(ConfigError::ValidationError(
                "container_id must be a non-empty id without whitespace or quotes".to_string(),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Page template text: the configured file, or the built-in page
    pub fn load_template(&self) -> Result<String> {
        match &self.template_path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Ok(DEFAULT_TEMPLATE.replace("data-table", &self.container_id)),
        }
    }
}

use crate::error::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_USER_AGENT: &str = "ThemeTracer/1.0";
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

pub const ENV_USE_LIVE_SOURCE: &str = "THEMETRACER_USE_LIVE_SOURCE";
pub const ENV_PAGE_SIZE: &str = "THEMETRACER_PAGE_SIZE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
}

/// Selects and parameterises the post source. Passed by value to whatever
/// builds the source; there is no process-wide copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub use_live_source: bool,
    pub user_agent: String,
    pub base_url: String,
    pub page_size: u32,
    pub simulated_delay_ms: u64,
    pub simulated_seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            use_live_source: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            simulated_delay_ms: 1500,
            simulated_seed: None,
        }
    }
}

impl AppConfig {
    /// Loads the TOML file at `path` (defaults when `None`), applies
    /// environment overrides and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        info!(
            "Configuration loaded (live source: {}, page size: {})",
            config.source.use_live_source, config.source.page_size
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)?;
        debug!("Parsing configuration from {}", path.display());
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CoreError> {
        let config: AppConfig = toml::from_str(raw).map_err(ConfigError::from)?;
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_USE_LIVE_SOURCE) {
            self.source.use_live_source = parse_bool(ENV_USE_LIVE_SOURCE, &value)?;
        }
        if let Some(value) = lookup(ENV_PAGE_SIZE) {
            self.source.page_size =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: ENV_PAGE_SIZE.to_string(),
                        value: value.clone(),
                    })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let source = &self.source;
        if source.page_size == 0 || source.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "source.page_size".to_string(),
                value: source.page_size.to_string(),
            }
            .into());
        }
        if source.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.user_agent".to_string(),
                value: source.user_agent.clone(),
            }
            .into());
        }
        if !source.base_url.starts_with("http://") && !source.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidFormat {
                details: format!("source.base_url must be an http(s) URL: {}", source.base_url),
            }
            .into());
        }
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::domain::entities::{Region, RegionTable};

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub line: LineConfig,
    pub server: ServerConfig,
    pub forecast: ForecastConfig,
    /// Overrides the built-in region table when non-empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LineConfig {
    pub channel_secret: Option<String>,
    pub channel_access_token: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ForecastConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "tenki-bot".to_string(),
        }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_secret: None,
            channel_access_token: None,
            api_base: "https://api.line.me".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.jma.go.jp/bosai/forecast/data/forecast".to_string(),
            timeout_secs: 5,
        }
    }
}

/// LINE credentials, present and non-empty
#[derive(Debug, Clone)]
pub struct LineCredentials {
    pub channel_secret: String,
    pub channel_access_token: String,
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;

        if config.forecast.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("forecast.timeout-secs must be positive".to_string()));
        }
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }

    /// Overlay environment variables onto this config
    pub fn with_env(mut self) -> Self {
        if let Ok(secret) = std::env::var("LINE_CHANNEL_SECRET") {
            self.line.channel_secret = Some(secret);
        }

        if let Ok(token) = std::env::var("LINE_CHANNEL_ACCESS_TOKEN") {
            self.line.channel_access_token = Some(token);
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT: {}", port),
            }
        }

        if let Ok(url) = std::env::var("FORECAST_BASE_URL") {
            self.forecast.base_url = url;
        }

        self
    }

    /// Both LINE credentials are required to serve the webhook
    pub fn line_credentials(&self) -> Result<LineCredentials, ConfigError> {
        fn required(value: &Option<String>, field: &str) -> Result<String, ConfigError> {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingField(field.to_string()))
        }

        Ok(LineCredentials {
            channel_secret: required(&self.line.channel_secret, "line.channel-secret")?,
            channel_access_token: required(&self.line.channel_access_token, "line.channel-access-token")?,
        })
    }

    pub fn region_table(&self) -> RegionTable {
        if self.regions.is_empty() {
            RegionTable::builtin()
        } else {
            RegionTable::new(self.regions.iter().cloned())
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

use anyhow::Result;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LLMConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Base URL of the chat-completions API. Overridable so tests can point
    /// the client at a local mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Knobs for the metrics/forecast engine. The window defaults match what the
/// dashboard expects: a short window for daily detail, a long one for trends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_short_days")]
    pub short_days: i64,
    #[serde(default = "default_long_days")]
    pub long_days: i64,
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
    #[serde(default = "default_low_stock_limit")]
    pub low_stock_limit: usize,
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
    /// When true, days without orders are inserted as zero-sale points before
    /// the forecast fit instead of being skipped.
    #[serde(default)]
    pub zero_fill_gaps: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_db_path() -> String {
    "cafemetrics.db".to_string()
}

fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_max_tokens() -> u32 {
    400
}

fn default_temperature() -> f32 {
    0.7
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_short_days() -> i64 {
    7
}

fn default_long_days() -> i64 {
    30
}

fn default_top_limit() -> usize {
    5
}

fn default_low_stock_threshold() -> i64 {
    5
}

fn default_low_stock_limit() -> usize {
    10
}

fn default_max_alerts() -> usize {
    5
}

fn default_forecast_days() -> usize {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_base: default_api_base(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            short_days: default_short_days(),
            long_days: default_long_days(),
            top_limit: default_top_limit(),
            low_stock_threshold: default_low_stock_threshold(),
            low_stock_limit: default_low_stock_limit(),
            max_alerts: default_max_alerts(),
            forecast_days: default_forecast_days(),
            zero_fill_gaps: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn api_key() -> Result<String> {
        env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))
    }
}

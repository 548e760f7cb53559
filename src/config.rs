use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::services::groq::{DEFAULT_GROQ_ENDPOINT, DEFAULT_GROQ_MODEL};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub inference: InferenceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Locations of the read-only datasets
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "default_triage_path")]
    pub triage_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            triage_path: default_triage_path(),
        }
    }
}

fn default_catalog_path() -> String { "data/hospitals.csv".to_string() }
fn default_triage_path() -> String { "data/symptoms_triage.csv".to_string() }

/// External specialty inference; a missing API key disables it
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl InferenceSettings {
    /// API key, if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

fn default_endpoint() -> String { DEFAULT_GROQ_ENDPOINT.to_string() }
fn default_model() -> String { DEFAULT_GROQ_MODEL.to_string() }
fn default_timeout_ms() -> u64 { 6000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unknown names fall back to JSON
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" | "text" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.format)
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOSPITAL_MATCH)
    /// 5. GROQ_API_KEY / GROQ_MODEL
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOSPITAL_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOSPITAL_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HOSPITAL_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the inference credentials the deployment exports under their own names
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GROQ_API_KEY").ok();
    let model = env::var("GROQ_MODEL").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("inference.api_key", api_key)?;
    }
    if let Some(model) = model {
        builder = builder.set_override("inference.model", model)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.inference.timeout_ms, 6000);
        assert_eq!(settings.inference.model, "llama-3.1-8b-instant");
        assert_eq!(settings.data.catalog_path, "data/hospitals.csv");
        assert!(settings.inference.api_key().is_none());
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let inference = InferenceSettings {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(inference.api_key().is_none());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_log_format_selection() {
        assert_eq!(LoggingSettings::default().log_format(), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Pretty "), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Json);
    }

    #[test]
    fn test_load_shipped_config() {
        let settings = Settings::load_from("config/default.toml").unwrap();
        assert_eq!(settings.inference.timeout_ms, 6000);
        assert_eq!(settings.data.triage_path, "data/symptoms_triage.csv");
    }
}

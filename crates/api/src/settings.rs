//! Service Settings
//!
//! Layered: built-in defaults, then `config/default.toml` if present, then the
//! file named by `PREDICTION_API_CONFIG`, then `PREDICTION_API__*` variables.

use config::{Config, ConfigError, Environment, File, FileFormat};
use feature_engine::DefaultStrategy;
use inference_engine::HttpBackendConfig;
use serde::{Deserialize, Serialize};

/// Environment variable naming an extra settings file
pub const CONFIG_PATH_ENV: &str = "PREDICTION_API_CONFIG";

/// Prefix of overriding environment variables
pub const ENV_PREFIX: &str = "PREDICTION_API";

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub features: FeatureSettings,
    pub inference: InferenceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSettings {
    /// Statistic used for missing features
    pub strategy: DefaultStrategy,
}

/// Which scoring backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    /// In-process canned answers, for local development
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub backend: BackendKind,
    pub endpoint: String,
    pub content_type: String,
    pub timeout_ms: u64,
    /// JSON field holding the prediction in structured responses
    pub prediction_field: String,
    /// Answer given by the mock backend
    pub mock_prediction: String,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        let http = HttpBackendConfig::default();
        Self {
            backend: BackendKind::Http,
            endpoint: http.endpoint,
            content_type: http.content_type,
            timeout_ms: http.timeout_ms,
            prediction_field: "prediction".to_string(),
            mock_prediction: "0.5".to_string(),
        }
    }
}

impl InferenceSettings {
    pub fn http_config(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            endpoint: self.endpoint.clone(),
            content_type: self.content_type.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace | debug | info | warn | error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from files and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name("config/default").required(false));

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            builder = builder.add_source(File::with_name(&path));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse settings from TOML text, on top of the built-in defaults
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

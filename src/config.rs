//! Application configuration.
//!
//! Loaded from YAML files and `CART_OFFERS__`-prefixed environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::segment::HttpSegmentResolverConfig;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "CART_OFFERS_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "CART_OFFERS";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "CART_OFFERS_LOG";

/// Default HTTP port for the offer API.
pub const DEFAULT_PORT: u16 = 9002;
/// Default base URL of the user segment service.
pub const DEFAULT_SEGMENT_SERVICE_URL: &str = "http://localhost:1080/api/v1";
/// Default segment lookup timeout in milliseconds.
pub const DEFAULT_SEGMENT_TIMEOUT_MS: u64 = 2000;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// User segment service configuration.
    pub segment_service: SegmentServiceConfig,
    /// Discount policy.
    pub offers: OfferPolicyConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port for the offer API.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// User segment service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmentServiceConfig {
    /// Base URL; lookups go to `{base_url}/user_segment`.
    pub base_url: String,
    /// Lookup timeout in milliseconds.
    pub timeout_ms: u64,
    /// Answer from the static table when the service fails.
    pub fallback: bool,
}

impl Default for SegmentServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEGMENT_SERVICE_URL.to_string(),
            timeout_ms: DEFAULT_SEGMENT_TIMEOUT_MS,
            fallback: true,
        }
    }
}

impl SegmentServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Client settings for [`crate::segment::HttpSegmentResolver`].
    pub fn http_resolver_config(&self) -> HttpSegmentResolverConfig {
        HttpSegmentResolverConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
    }
}

/// Discount policy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfferPolicyConfig {
    /// Floor discounted cart values at zero. Off keeps negative totals.
    pub clamp_at_zero: bool,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `config.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::sync::OnceLock;
use wally_types::display::{DEFAULT_EXPLORER_URL, DEFAULT_SOURCE_URL};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Upstream wallet-generation service
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL; requests go to `{url}/api/walletGen`
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// Upper bound for a single upstream call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_upstream_url() -> String {
    "https://engage-dev.com/wally".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Web server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Project source link shown on the informational view
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Block explorer address prefix; empty disables the link
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
    /// Render the seed phrase row without the user toggling it
    #[serde(default)]
    pub show_seed_phrase: bool,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    3000
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_explorer_url() -> String {
    DEFAULT_EXPLORER_URL.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            source_url: default_source_url(),
            explorer_url: default_explorer_url(),
            show_seed_phrase: false,
        }
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub web: WebConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., WALLY_UPSTREAM__URL, WALLY_WEB__PORT
            .add_source(
                Environment::with_prefix("WALLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Initialize the global config singleton
    pub fn init() -> Result<&'static Self, ConfigError> {
        let config = Self::load()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}

impl UpstreamConfig {
    /// Join a path onto the base URL with proper slash handling
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

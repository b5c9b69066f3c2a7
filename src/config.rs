//! Configuration management and validation.
//!
//! Provides configuration structures for the HTTP server, the weather store
//! and the HTTP client, loaded from a TOML file with defaults for anything
//! the file leaves out.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_BIND_ADDRESS, FRESHNESS_WINDOW,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server listens on
    pub bind_address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Weather store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seed the starter airports at startup
    pub seed_starter_airports: bool,

    /// Seconds within which a record's last update counts as fresh
    pub freshness_window_secs: u64,

    /// Airport feed preloaded into the store at startup
    pub airport_feed: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_starter_airports: true,
            freshness_window_secs: FRESHNESS_WINDOW.as_secs(),
            airport_feed: None,
        }
    }
}

impl StoreConfig {
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_window_secs)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of a running weather server
    pub base_url: String,

    /// Maximum in-flight requests when uploading an airport feed
    pub upload_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_concurrency: num_cpus::get(),
        }
    }
}

/// Global configuration for the airport weather service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub client: ClientConfig,
}

fn default_bind_address() -> SocketAddr {
    DEFAULT_BIND_ADDRESS
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 9090)))
}

impl Config {
    /// Load configuration from `path`, else the user config file, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file: {}", path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::config_parsing(path.display().to_string(), e))?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `<config_dir>/airport-weather/config.toml`, when a config dir exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.store.freshness_window_secs == 0 {
            return Err(Error::configuration(
                "Freshness window must be greater than 0 seconds",
            ));
        }

        if self.client.upload_concurrency == 0 {
            return Err(Error::configuration(
                "Upload concurrency must be greater than 0",
            ));
        }

        if !(self.client.base_url.starts_with("http://")
            || self.client.base_url.starts_with("https://"))
        {
            return Err(Error::configuration(format!(
                "Base URL must start with http:// or https://: {}",
                self.client.base_url
            )));
        }

        Ok(())
    }

    /// Set the server bind address
    pub fn with_bind_address(mut self, address: SocketAddr) -> Self {
        self.server.bind_address = address;
        self
    }

    /// Set the client base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.base_url = base_url.into();
        self
    }

    /// Set the feed upload concurrency
    pub fn with_upload_concurrency(mut self, concurrency: usize) -> Self {
        self.client.upload_concurrency = concurrency;
        self
    }

    /// Preload an airport feed at startup
    pub fn with_airport_feed(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.airport_feed = Some(path.into());
        self
    }

    /// Start with an empty registry
    pub fn without_starter_airports(mut self) -> Self {
        self.store.seed_starter_airports = false;
        self
    }

    /// Set the freshness window used by health reports
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.store.freshness_window_secs = window.as_secs();
        self
    }
}

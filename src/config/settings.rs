use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

pub const DEFAULT_STREAM_URL: &str = "http://localhost:8000/stream";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub stream: StreamConfig,
    pub demo: DemoConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// SSE endpoint for live messages
    pub url: String,
    /// Connect when the console starts
    pub auto_connect: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub host: String,
    pub port: u16,
    /// Delay between emitted demo messages
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Redraw interval
    pub tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stream: StreamConfig {
                url: DEFAULT_STREAM_URL.to_string(),
                auto_connect: false,
            },
            demo: DemoConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                interval: Duration::from_millis(2000),
            },
            ui: UiConfig {
                tick: Duration::from_millis(16),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlStreamConfig {
    pub url: Option<String>,
    pub auto_connect: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlDemoConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlUiConfig {
    pub tick_ms: Option<u64>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub stream: Option<TomlStreamConfig>,
    pub demo: Option<TomlDemoConfig>,
    pub ui: Option<TomlUiConfig>,
}

impl Config {
    /// Load `<data_dir>/config.toml`, merging with defaults.
    ///
    /// On first run the bundled example is written next to the logs so the
    /// available keys are discoverable.
    pub fn load() -> Result<Self, ConfigError> {
        let config_file = config_path();
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }
        Self::load_from(&config_file)
    }

    /// Load a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config = toml::from_str::<TomlConfig>(contents)?;
        let mut config = Config::default();
        config.merge(toml_config);
        Ok(config)
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(stream) = toml_config.stream {
            if let Some(url) = stream.url {
                self.stream.url = url;
            }
            if let Some(auto_connect) = stream.auto_connect {
                self.stream.auto_connect = auto_connect;
            }
        }

        if let Some(demo) = toml_config.demo {
            if let Some(host) = demo.host {
                self.demo.host = host;
            }
            if let Some(port) = demo.port {
                self.demo.port = port;
            }
            if let Some(interval_ms) = demo.interval_ms {
                self.demo.interval = Duration::from_millis(interval_ms.max(1));
            }
        }

        if let Some(ui) = toml_config.ui {
            if let Some(tick_ms) = ui.tick_ms {
                self.ui.tick = Duration::from_millis(tick_ms.max(1));
            }
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "Failed to create config directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write default config");
        }
    }

    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream.url = url.into();
        self
    }

    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.stream.auto_connect = auto_connect;
        self
    }
}

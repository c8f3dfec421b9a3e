//! Configuration management for Learn
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (LEARN_*)
//! 3. Config file (~/.config/learn/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::plan::Renderer;
use crate::{Error, Result};

/// Plan backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the plan backend
    pub base_url: String,

    /// Request timeout; plan generation on the server is slow
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Model the backend should plan with
    pub model: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout: Duration::from_secs(60),
            model: None, // Let the backend pick
        }
    }
}

impl ApiConfig {
    /// Parse and validate `base_url`
    pub fn url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base_url {}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Invalid base_url {}: scheme must be http or https",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Check `base_url` and `timeout`
    pub fn validate(&self) -> Result<()> {
        self.url()?;
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Plan rendering settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces per nesting level
    pub indent: usize,

    /// Deepest subject level rendered before summarizing
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let renderer = Renderer::default();
        Self {
            indent: renderer.indent,
            max_depth: renderer.max_depth,
        }
    }
}

impl RenderConfig {
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.indent, self.max_depth)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Backend configuration
    pub api: ApiConfig,

    /// Rendering configuration
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/learn/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("learn").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - LEARN_BASE_URL: Backend origin
    /// - LEARN_TIMEOUT: Request timeout in seconds
    /// - LEARN_MODEL: Model to use
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(base_url) = var("LEARN_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Some(timeout) = var("LEARN_TIMEOUT") {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("LEARN_TIMEOUT must be whole seconds, got {:?}", timeout))
            })?;
            self.api.timeout = Duration::from_secs(secs);
        }

        if let Some(model) = var("LEARN_MODEL") {
            self.api.model = Some(model);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        model: Option<String>,
    ) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }

        if let Some(secs) = timeout_secs {
            self.api.timeout = Duration::from_secs(secs);
        }

        if let Some(m) = model {
            self.api.model = Some(m);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        model: Option<String>,
    ) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(base_url, timeout_secs, model);
        config.api.validate()?;
        Ok(config)
    }
}

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlannerError;
use crate::planner::wire::{RequestEncoding, ResponseShape, WireContract};

/// Environment variable naming the planning service base URL.
///
/// Read at run time, and also captured at build time as the last configured fallback.
pub const API_URL_ENV: &str = "DAYFLOW_API_URL";

/// Base URL baked in at build time, if `DAYFLOW_API_URL` was set then
const BUILD_API_URL: Option<&str> = option_env!("DAYFLOW_API_URL");

/// Local planning service used by debug builds when nothing else is configured
pub const DEV_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub api: ApiConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub endpoint: String,
    pub request_encoding: RequestEncoding,
    pub response_shape: ResponseShape,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoint: "/schedule".to_string(),
            request_encoding: RequestEncoding::JsonArray,
            response_shape: ResponseShape::Flat,
            timeout_ms: 30000,
        }
    }
}

impl ApiConfig {
    pub fn contract(&self) -> WireContract {
        WireContract::new(self.request_encoding, self.response_shape)
    }

    /// Base URL to send requests to.
    ///
    /// Configured value first, then the build-time value, then the local
    /// development server in debug builds only.
    pub fn resolve_base_url(&self) -> std::result::Result<String, PlannerError> {
        if let Some(url) = non_blank(self.base_url.as_deref()) {
            return Ok(url.to_string());
        }
        if let Some(url) = non_blank(BUILD_API_URL) {
            return Ok(url.to_string());
        }
        if cfg!(debug_assertions) {
            log::debug!("No API URL configured, using {}", DEV_API_URL);
            return Ok(DEV_API_URL.to_string());
        }
        Err(PlannerError::Config(format!(
            "no planning service URL configured; set {} or api.base_url",
            API_URL_ENV
        )))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            api: ApiConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

/// Values given on the command line; each one replaces the file value when set.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub endpoint: Option<String>,
    pub request_encoding: Option<RequestEncoding>,
    pub response_shape: Option<ResponseShape>,
}

impl Config {
    /// Load configuration with fallback chain, then layer the environment on top
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_env(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply the `DAYFLOW_API_URL` value, if set and not blank
    pub fn apply_env(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            log::debug!("Using {} from environment: {}", API_URL_ENV, url);
            self.api.base_url = Some(url);
        }
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api.base_url = Some(url.clone());
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.api.endpoint = endpoint.clone();
        }
        if let Some(encoding) = overrides.request_encoding {
            self.api.request_encoding = encoding;
        }
        if let Some(shape) = overrides.response_shape {
            self.api.response_shape = shape;
        }
    }

    /// Log filter to use when `RUST_LOG` is not set
    pub fn log_filter(&self, verbose: bool) -> String {
        if verbose {
            "debug".to_string()
        } else {
            self.log_level.clone().unwrap_or_else(|| "info".to_string())
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

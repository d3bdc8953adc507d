//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (rides in through clap's `env` attributes)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_BASE_URL: &str = "https://letterboxd.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Config file looked for in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "reeldraw.toml";

/// On-disk TOML configuration; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub upstream: UpstreamSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Load from an explicit path. The file must exist and parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Load from an optional path.
    ///
    /// With an explicit path the file must load; without one, a missing
    /// `reeldraw.toml` in the working directory falls back to defaults
    /// instead of failing startup.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
}

/// Upstream client settings
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Resolve the effective configuration from CLI overrides and a loaded
/// config file.
pub fn resolve(cli_port: Option<u16>, cli_bind: Option<String>, file: TomlConfig) -> AppConfig {
    AppConfig {
        port: cli_port.or(file.server.port).unwrap_or(DEFAULT_PORT),
        bind: cli_bind
            .or(file.server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string()),
        upstream: UpstreamConfig {
            base_url: file
                .upstream
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: file.upstream.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        },
    }
}

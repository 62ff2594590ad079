//! Configuration for the parkctl workspace
//!
//! Loaded from `~/.parkctl/config.toml` (or an explicit path). Every table is
//! optional; missing values fall back to defaults. Environment overrides are
//! applied on top, and CLI flags on top of that by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::fee::FeePolicy;

/// Default number of parking slots
pub const DEFAULT_CAPACITY: u32 = 10;

/// Default SQLite database location, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/parking.db";

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkctlConfig {
    pub parking: ParkingConfig,
    pub server: ServerSection,
    pub database: DatabaseConfig,
}

/// Business rules: capacity and fee schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    pub capacity: u32,
    pub fees: FeePolicy,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            fees: FeePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl ParkctlConfig {
    /// Get config file path: ~/.parkctl/config.toml
    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from the default path, falling back to defaults if it is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml(&content)
            .context(format!("Failed to parse config file: {:?}", path))?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PARKCTL_CAPACITY`, `PARKCTL_BIND` and `DATABASE_URL` from the
    /// process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(capacity) = lookup("PARKCTL_CAPACITY") {
            self.parking.capacity = capacity
                .trim()
                .parse()
                .context(format!("PARKCTL_CAPACITY is not a number: {:?}", capacity))?;
        }
        if let Some(bind) = lookup("PARKCTL_BIND") {
            self.server.bind = bind
                .trim()
                .parse()
                .context(format!("PARKCTL_BIND is not a socket address: {:?}", bind))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.database.url = url.trim().to_string();
            }
        }
        self.validate()
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.parking.capacity == 0 {
            anyhow::bail!("parking.capacity must be at least 1");
        }
        self.parking
            .fees
            .validate()
            .map_err(|reason| anyhow::anyhow!("parking.{}", reason))?;
        Ok(())
    }

    /// Write config to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = self.to_toml()?;

        fs::write(path, toml_str)
            .context(format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

/// Get the parkctl config directory path (~/.parkctl)
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".parkctl")
}

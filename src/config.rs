//! Host configuration.
//!
//! Configuration is read from an INI-style file or from JSON. The INI reader
//! flattens `[Section]` / `key = value` pairs into `Section.key` entries.

use crate::core::{Error, Result};
use crate::logging::{LogConfig, LogFormat};
use crate::plugin::registry::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Flat key/value view of an INI-style file.
#[derive(Clone, Debug, Default)]
pub struct IniConfig {
    values: HashMap<String, String>,
}

impl IniConfig {
    /// Parse INI text.
    ///
    /// Blank lines and lines starting with `#` are skipped, as are lines
    /// without `=`. Later keys overwrite earlier ones.
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        let mut section = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
                section = line[1..line.len() - 1].to_string();
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let key = if section.is_empty() {
                    key.to_string()
                } else {
                    format!("{section}.{key}")
                };
                values.insert(key, value.trim().to_string());
            }
        }

        Self { values }
    }

    /// Read and parse an INI file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Value for `key`, or `default` when absent.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Value for `key`, if present.
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Host configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Duplicate command name handling
    pub duplicate_policy: DuplicatePolicy,
    /// Idle event period for the idle driver (ms)
    pub idle_interval_ms: u64,
    /// Logging configuration
    pub logging: LogConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Shadow,
            idle_interval_ms: 1000,
            logging: LogConfig::default(),
        }
    }
}

impl HostConfig {
    /// Build from INI values, falling back to defaults for absent keys.
    pub fn from_ini(ini: &IniConfig) -> Result<Self> {
        let mut config = Self::default();

        if let Some(policy) = ini.get_opt("Host.duplicate_policy") {
            config.duplicate_policy = policy.parse()?;
        }
        if let Some(interval) = ini.get_opt("Host.idle_interval_ms") {
            config.idle_interval_ms = interval.parse().map_err(|_| {
                Error::Config(format!("invalid Host.idle_interval_ms: {interval}"))
            })?;
        }
        if let Some(level) = ini.get_opt("Logging.level") {
            config.logging.level = level.to_string();
        }
        if let Some(format) = ini.get_opt("Logging.format") {
            config.logging.format = format.parse::<LogFormat>()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as INI.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&std::fs::read_to_string(path)?),
            _ => Self::from_ini(&IniConfig::load(path)?),
        }
    }

    /// Idle event period.
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.idle_interval_ms == 0 {
            return Err(Error::Config(
                "Host.idle_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

//! Configuration file
//!
//! Defaults for the command line plus extra pricing rows, read from TOML.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::pricing::{ModelPricing, PricingTable, PricingUnit, Provider, ServiceTier};

const APP_DIR: &str = "llm-pricing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// A pricing row declared in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    pub provider: Provider,
    pub model: String,
    #[serde(default)]
    pub tier: ServiceTier,
    #[serde(default)]
    pub unit: PricingUnit,
    pub input: f64,
    #[serde(default)]
    pub input_cached: Option<f64>,
    #[serde(default)]
    pub output: Option<f64>,
}

impl ModelEntry {
    fn pricing(&self) -> Result<ModelPricing, ConfigError> {
        let check = |field: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(ConfigError::InvalidRate {
                    model: self.model.clone(),
                    field,
                    value,
                })
            }
        };
        Ok(ModelPricing {
            input: check("input", self.input)?,
            input_cached: self
                .input_cached
                .map(|v| check("input_cached", v))
                .transpose()?,
            output: self.output.map(|v| check("output", v)).transpose()?,
            unit: self.unit,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub decimals: Option<usize>,
    #[serde(default)]
    pub tier: Option<ServiceTier>,
    #[serde(default)]
    pub stt_model: Option<String>,
    #[serde(default)]
    pub color: Option<ConfigColorMode>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load `explicit` if given, else the first config file found in the
    /// standard locations. No file at all yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        for path in Self::config_paths() {
            if path.is_file() {
                return Self::read(&path);
            }
        }
        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Candidate locations, highest priority first.
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_DIR).join("config.toml"));
        }

        // Application Support on macOS, %APPDATA% on Windows
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join(APP_DIR).join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{APP_DIR}.toml")));
        }

        paths
    }

    /// The built-in table with the configured rows added on top.
    pub fn pricing_table(&self) -> Result<PricingTable, ConfigError> {
        let mut table = PricingTable::builtin().clone();
        for entry in &self.models {
            let pricing = entry.pricing()?;
            if table
                .insert(entry.provider, &entry.model, entry.tier, pricing)
                .is_some()
            {
                tracing::debug!(
                    provider = %entry.provider,
                    model = %entry.model,
                    tier = %entry.tier,
                    "config overrides built-in rates"
                );
            }
        }
        Ok(table)
    }
}

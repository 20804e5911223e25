use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use sysex_param::FrequencyDecoder;

/// Calibration file, e.g.
///
/// ```toml
/// [frequency]
/// max_frequency = 20000
/// decay_multiplier = 1002
/// ```
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub frequency: FrequencyDecoder,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;

        let config = Self::parse(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;

        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

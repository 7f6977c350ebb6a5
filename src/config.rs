use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::flags::DatasiftActivity;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) output: OutputConfig,
    pub(crate) log: LogConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct OutputConfig {
    pub(crate) pretty: bool,
    /// Log and skip lines that fail to parse or convert instead of aborting.
    pub(crate) skip_invalid: bool,
    pub(crate) report_issues: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub(crate) level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            skip_invalid: true,
            report_issues: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Command line switches only ever turn things on.
    pub(crate) fn with_flags(mut self, flags: &DatasiftActivity) -> Config {
        self.output.pretty |= flags.pretty;
        self.output.report_issues |= flags.report_issues;
        self
    }
}

//! Configuration file schema for pytally.
//!
//! Every key is optional; command-line flags win over the file and the
//! file wins over the built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names to search for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["pytally.yaml", ".pytally.yaml"];

/// Analysis root used when neither the command line nor a config names one.
pub const DEFAULT_ROOT: &str = "../3.4_공통_통합_기능_개발/소스코드";

/// Structured report file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "analysis_result.json";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Top-level config file definition.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory to analyze
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Where to write the structured report
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Tracing filter directive (e.g. "debug", "pytally=trace")
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. Empty text is an empty config.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Resolve the analysis root, preferring `cli`.
    pub fn root(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }

    /// Resolve the report output path, preferring `cli`.
    pub fn output(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Resolve the log filter, preferring `cli`.
    pub fn log_level<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.or(self.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Find a config file in `dir`, if any of the default names exist.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

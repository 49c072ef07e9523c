//! CLI configuration management
//!
//! Loads `pricer.toml`, applies `PRICER_*` environment overrides and
//! validates the result. Every problem found is reported at once.
//!
//! ```toml
//! log_level = "info"
//!
//! [engine]
//! num_simulations = 20000
//! num_steps = 100
//! batch_size = 1024
//! seed = 42
//! workers = 4
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use pricer_pricing::EngineConfig;
use serde::Deserialize;

use crate::{CliError, Result};

/// Log levels accepted in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!(
                "Invalid log level: {s}. Must be one of: trace, debug, info, warn, error"
            )),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Top-level CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Pricing engine defaults
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file, or defaults when the file is absent
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigFile(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| CliError::ConfigFile(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Build configuration from file and process environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Default values
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        let mut problems = config.apply_overrides(|key| std::env::var(key).ok());
        if !problems.is_empty() {
            problems.extend(config.problems());
            return Err(CliError::Validation(problems));
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply `PRICER_*` overrides from `lookup`, returning unparsable values
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();

        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            match level.parse() {
                Ok(level) => self.log_level = level,
                Err(message) => problems.push(format!("PRICER_LOG_LEVEL: {message}")),
            }
        }
        if let Some(workers) = parse_env(&lookup, "PRICER_WORKERS", &mut problems) {
            self.engine.workers = Some(workers);
        }
        if let Some(paths) = parse_env(&lookup, "PRICER_NUM_SIMULATIONS", &mut problems) {
            self.engine.num_simulations = paths;
        }
        if let Some(steps) = parse_env(&lookup, "PRICER_NUM_STEPS", &mut problems) {
            self.engine.num_steps = steps;
        }
        if let Some(seed) = parse_env(&lookup, "PRICER_SEED", &mut problems) {
            self.engine.seed = Some(seed);
        }

        problems
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(problems))
        }
    }

    fn problems(&self) -> Vec<String> {
        let engine = &self.engine;
        let checks = [
            EngineConfig {
                num_simulations: engine.num_simulations,
                ..EngineConfig::default()
            },
            EngineConfig {
                num_steps: engine.num_steps,
                ..EngineConfig::default()
            },
            EngineConfig {
                batch_size: engine.batch_size,
                ..EngineConfig::default()
            },
            EngineConfig {
                workers: engine.workers,
                ..EngineConfig::default()
            },
        ];
        checks
            .iter()
            .filter_map(|check| check.validate().err())
            .map(|err| format!("engine.{}", err.reason().trim_start_matches("invalid parameter ")))
            .collect()
    }
}

fn parse_env<T, F>(lookup: &F, key: &str, problems: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            problems.push(format!("{key}: cannot parse '{raw}'"));
            None
        }
    }
}

use crate::Result;
use anyhow::anyhow;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_LEVEL: &str = "info";

/// Where console logs should be emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConsoleOutput {
    Stdout,
    #[default]
    Stderr,
    None,
}

impl fmt::Display for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleOutput::Stdout => write!(f, "stdout"),
            ConsoleOutput::Stderr => write!(f, "stderr"),
            ConsoleOutput::None => write!(f, "none"),
        }
    }
}

impl FromStr for ConsoleOutput {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "stdout" => Ok(ConsoleOutput::Stdout),
            "stderr" => Ok(ConsoleOutput::Stderr),
            "none" => Ok(ConsoleOutput::None),
            _ => Err(format!(
                "invalid FLOWSIEVE_LOG_CONSOLE '{}'; supported values are stdout, stderr, none",
                value
            )),
        }
    }
}

/// Resolved logging configuration after applying environment overrides.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub default_level: String,
    pub console_output: ConsoleOutput,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: DEFAULT_LEVEL.to_string(),
            console_output: ConsoleOutput::default(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Load configuration: built-in defaults, then FLOWSIEVE_* overrides.
    pub fn load() -> Result<Self> {
        let mut config = LoggingConfig::default();
        if let Ok(level) = env::var("FLOWSIEVE_LOG") {
            if !level.trim().is_empty() {
                config.default_level = level;
            }
        }
        if let Ok(console) = env::var("FLOWSIEVE_LOG_CONSOLE") {
            config.console_output = console.parse().map_err(|err: String| anyhow!(err))?;
        }
        if let Ok(log_file) = env::var("FLOWSIEVE_LOG_FILE") {
            if !log_file.trim().is_empty() {
                config.log_file = Some(PathBuf::from(log_file));
            }
        }
        Ok(config)
    }
}

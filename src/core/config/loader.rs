#![allow(clippy::result_large_err)]

use super::FlowsieveConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "flowsieve.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config for a run. An explicit path must exist; the implicit
    /// ./flowsieve.toml may be absent (defaults apply). Environment variables
    /// override config file values.
    pub fn load(config_path: Option<&Path>) -> Result<FlowsieveConfig, AppError> {
        let mut config = match config_path {
            Some(path) => Self::load_from_file(path)?.ok_or_else(|| {
                AppError::new(
                    ErrorCategory::IoError,
                    format!("config file not found: {}", path.display()),
                )
            })?,
            None => Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))?.unwrap_or_default(),
        };

        Self::apply_env_overrides(&mut config);
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load config from a specific file path. Returns Ok(None) if the file
    /// doesn't exist.
    pub fn load_from_file(path: &Path) -> Result<Option<FlowsieveConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: FlowsieveConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(config: &mut FlowsieveConfig) {
        if let Ok(value) = env::var("FLOWSIEVE_MAX_VARIANTS") {
            if let Ok(max_variants) = value.parse::<usize>() {
                config.clean.max_variants = max_variants;
            }
        }

        if let Ok(value) = env::var("FLOWSIEVE_DEDUPE") {
            if let Ok(dedupe) = value.parse::<bool>() {
                config.clean.dedupe = dedupe;
            }
        }

        if let Ok(value) = env::var("FLOWSIEVE_FIX_NAMES") {
            if let Ok(fix_names) = value.parse::<bool>() {
                config.clean.fix_names = fix_names;
            }
        }

        if let Ok(value) = env::var("FLOWSIEVE_CLEAN_OUTPUT") {
            if let Ok(clean_output) = value.parse::<bool>() {
                config.clean.clean_output = clean_output;
            }
        }

        if let Ok(value) = env::var("FLOWSIEVE_MAX_LISTED_TYPES") {
            if let Ok(max_listed_types) = value.parse::<usize>() {
                config.clean.max_listed_types = max_listed_types;
            }
        }
    }

    /// Get documentation for supported environment variables.
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "FLOWSIEVE_MAX_VARIANTS - Override variants kept per signature (default: 3)",
            "FLOWSIEVE_DEDUPE - Override whether the variant cap applies (true/false, default: true)",
            "FLOWSIEVE_FIX_NAMES - Override whether mismatched names are rewritten (true/false, default: true)",
            "FLOWSIEVE_CLEAN_OUTPUT - Override whether artifacts are projected (true/false, default: true)",
            "FLOWSIEVE_MAX_LISTED_TYPES - Override node types listed per instruction (default: 8)",
        ]
    }

    /// Validate configuration values.
    pub fn validate_config(config: &FlowsieveConfig) -> Result<(), AppError> {
        config.clean.validate()
    }
}

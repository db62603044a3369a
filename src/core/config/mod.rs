#![allow(clippy::result_large_err)]

mod loader;

pub use loader::ConfigLoader;

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde::{Deserialize, Serialize};

fn default_max_variants() -> usize {
    3
}

fn default_enabled() -> bool {
    true
}

fn default_max_listed_types() -> usize {
    8
}

/// Root flowsieve.toml document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowsieveConfig {
    /// Cleaning configuration
    #[serde(default)]
    pub clean: CleanOptions,
}

/// Knobs for one cleaning run. CLI flags are applied on top of whatever the
/// config file and environment produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Variants kept per structural signature
    #[serde(default = "default_max_variants")]
    pub max_variants: usize,

    /// Whether the per-signature variant cap is applied at all
    #[serde(default = "default_enabled")]
    pub dedupe: bool,

    /// Whether mismatched platform names are rewritten
    #[serde(default = "default_enabled")]
    pub fix_names: bool,

    /// Whether artifacts are projected down to their essential fields
    #[serde(default = "default_enabled")]
    pub clean_output: bool,

    /// Node types listed in a rebuilt instruction before eliding
    #[serde(default = "default_max_listed_types")]
    pub max_listed_types: usize,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            max_variants: default_max_variants(),
            dedupe: true,
            fix_names: true,
            clean_output: true,
            max_listed_types: default_max_listed_types(),
        }
    }
}

impl CleanOptions {
    /// Ensure the options are sane before a run starts.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_variants == 0 {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "max_variants must be >= 1",
            ));
        }
        if self.max_listed_types == 0 {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "max_listed_types must be >= 1",
            ));
        }
        Ok(())
    }
}

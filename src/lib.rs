//! flowsieve cleans workflow fine-tuning corpora: it deduplicates examples by
//! structural signature, keeps the highest-scored variants, repairs workflow
//! names that contradict their trigger platform, and projects artifacts down
//! to the fields that matter for training.

pub mod cli;
pub mod core;
pub mod logging;

/// Current crate version string exposed for CLI and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, anyhow::Error>;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args)]
pub struct CleanArgs {
    /// Raw corpus to clean (JSON Lines)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination for the cleaned corpus (default: <input stem>_clean.jsonl)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Variants kept per structural signature (default: 3)
    #[arg(long, value_name = "N", help_heading = "Selection")]
    pub max_variants: Option<usize>,

    /// Keep every variant instead of truncating per-signature buckets
    #[arg(long, help_heading = "Selection")]
    pub no_dedupe: bool,

    /// Leave workflow names untouched
    #[arg(long, help_heading = "Normalization")]
    pub no_fix_names: bool,

    /// Keep full artifacts instead of projecting to essential fields
    #[arg(long, help_heading = "Normalization")]
    pub no_clean_output: bool,

    /// Node types listed in a rebuilt instruction before eliding (default: 8)
    #[arg(long, value_name = "N", help_heading = "Normalization")]
    pub max_listed_types: Option<usize>,

    /// Path to custom config file (default: ./flowsieve.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Cleaned corpus to convert (JSON Lines)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Target chat-turn schema
    #[arg(long, default_value = "chatml", value_name = "FORMAT")]
    pub format: ConvertFormat,

    /// Output stem; files land next to it as <stem>_<format>_{train,val}.jsonl
    #[arg(long, default_value = "finetune", value_name = "STEM")]
    pub output: PathBuf,

    /// Fraction of examples that go to the training split
    #[arg(long, default_value = "0.9", value_name = "RATIO", help_heading = "Split")]
    pub split_ratio: f64,

    /// Seed for the pre-split shuffle
    #[arg(long, default_value = "42", value_name = "SEED", help_heading = "Split")]
    pub seed: u64,

    /// Cap the number of examples converted (for smoke runs)
    #[arg(long, value_name = "N", help_heading = "Split")]
    pub max_examples: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
pub enum ConvertFormat {
    /// ChatML messages array with a system prompt
    Chatml,
    /// Vertex AI contents/parts tuning format
    Vertex,
    /// OpenAI fine-tuning messages format
    Openai,
    /// Every supported format
    All,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Raw corpus to summarize (JSON Lines)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: ReportFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
pub enum ReportFormat {
    /// Human-readable, Markdown-friendly summary
    Text,
    /// JSON payload suitable for downstream tooling
    Json,
}

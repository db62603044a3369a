#![allow(clippy::result_large_err)]

//! Re-projection of a cleaned corpus into chat-turn fine-tuning formats,
//! with a seeded shuffle and a train/validation split.

use crate::core::corpus::CleanedExample;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CHATML_SYSTEM_PROMPT: &str = "You are a workflow generation assistant. Given a description of what the workflow should do, generate the workflow JSON.";
const OPENAI_SYSTEM_PROMPT: &str =
    "You are a workflow generation assistant. Generate valid workflow JSON from descriptions.";

/// Supported chat-turn schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSchema {
    ChatMl,
    Vertex,
    OpenAi,
}

impl ChatSchema {
    /// Tag used in output file names.
    pub fn file_tag(&self) -> &'static str {
        match self {
            ChatSchema::ChatMl => "chatml",
            ChatSchema::Vertex => "vertex",
            ChatSchema::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ChatSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_tag())
    }
}

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub split_ratio: f64,
    pub seed: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            split_ratio: 0.9,
            seed: 42,
        }
    }
}

/// Where one schema's split landed and how many records each side holds.
#[derive(Debug)]
pub struct SplitOutcome {
    pub train_path: PathBuf,
    pub val_path: PathBuf,
    pub train_count: usize,
    pub val_count: usize,
}

/// Load a cleaned corpus, tolerating (and counting) malformed lines.
pub fn load_cleaned_corpus(input: &Path) -> Result<Vec<CleanedExample>, AppError> {
    let file = File::open(input).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to open input {}: {}", input.display(), e),
        )
    })?;

    let mut examples = Vec::new();
    let mut errors = 0u64;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("failed to read {}: {}", input.display(), e),
            )
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CleanedExample>(&line) {
            Ok(example) => examples.push(example),
            Err(err) => {
                errors += 1;
                warn!(line = index + 1, error = %err, "skipping undecodable cleaned record");
            }
        }
    }
    if errors > 0 {
        info!(errors, "skipped undecodable cleaned records");
    }
    Ok(examples)
}

/// Shuffle, split, and write one schema's train/val file pair.
pub fn convert_corpus(
    examples: &[CleanedExample],
    output_stem: &Path,
    schema: ChatSchema,
    options: &ConvertOptions,
) -> Result<SplitOutcome, AppError> {
    let mut shuffled: Vec<&CleanedExample> = examples.iter().collect();
    let mut rng = StdRng::seed_from_u64(options.seed);
    shuffled.shuffle(&mut rng);

    let split_index = (shuffled.len() as f64 * options.split_ratio) as usize;
    let (train, val) = shuffled.split_at(split_index);

    let train_path = split_path(output_stem, schema, "train");
    let val_path = split_path(output_stem, schema, "val");
    write_records(&train_path, schema, train)?;
    write_records(&val_path, schema, val)?;

    info!(
        format = schema.file_tag(),
        train = train.len(),
        val = val.len(),
        "wrote fine-tune split"
    );
    Ok(SplitOutcome {
        train_path,
        val_path,
        train_count: train.len(),
        val_count: val.len(),
    })
}

/// One chat-turn record for the given schema.
pub fn chat_record(schema: ChatSchema, example: &CleanedExample) -> Value {
    match schema {
        ChatSchema::ChatMl => json!({
            "messages": [
                {"role": "system", "content": CHATML_SYSTEM_PROMPT},
                {"role": "user", "content": example.instruction},
                {"role": "assistant", "content": example.output},
            ]
        }),
        ChatSchema::Vertex => json!({
            "contents": [
                {"role": "user", "parts": [{"text": example.instruction}]},
                {"role": "model", "parts": [{"text": example.output}]},
            ]
        }),
        ChatSchema::OpenAi => json!({
            "messages": [
                {"role": "system", "content": OPENAI_SYSTEM_PROMPT},
                {"role": "user", "content": example.instruction},
                {"role": "assistant", "content": example.output},
            ]
        }),
    }
}

fn write_records(
    path: &Path,
    schema: ChatSchema,
    examples: &[&CleanedExample],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to create output {}: {}", path.display(), e),
        )
    })?;
    let mut writer = BufWriter::new(file);
    for example in examples {
        let line = serde_json::to_string(&chat_record(schema, example))?;
        writeln!(writer, "{line}").map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("failed to write {}: {}", path.display(), e),
            )
        })?;
    }
    writer.flush().map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to flush {}: {}", path.display(), e),
        )
    })?;
    Ok(())
}

fn split_path(stem: &Path, schema: ChatSchema, split: &str) -> PathBuf {
    let file_stem = stem
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("finetune");
    let file_name = format!("{}_{}_{}.jsonl", file_stem, schema.file_tag(), split);
    match stem.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

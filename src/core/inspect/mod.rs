#![allow(clippy::result_large_err)]

//! Read-only corpus summaries: the same parser and fingerprinting as the
//! cleaning pipeline, aggregated instead of rewritten.

use crate::core::corpus::parse_record;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::warn;

/// Aggregate view of one raw corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub generated_at: DateTime<Utc>,
    pub total_read: u64,
    pub parsed: u64,
    pub decode_errors: u64,
    pub skipped_empty: u64,
    pub unique_signatures: u64,
    pub categories: IndexMap<String, u64>,
    pub triggers: IndexMap<String, u64>,
    pub node_count_min: u64,
    pub node_count_max: u64,
    pub node_count_mean: f64,
    pub score_mean: f64,
}

/// Summarize a raw corpus in one pass without writing anything.
pub fn summarize_corpus(input: &Path) -> Result<CorpusSummary, AppError> {
    let file = File::open(input).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to open input {}: {}", input.display(), e),
        )
    })?;

    let mut total_read = 0u64;
    let mut parsed = 0u64;
    let mut decode_errors = 0u64;
    let mut skipped_empty = 0u64;
    let mut signatures: HashSet<String> = HashSet::new();
    let mut categories: IndexMap<String, u64> = IndexMap::new();
    let mut triggers: IndexMap<String, u64> = IndexMap::new();
    let mut node_count_min = u64::MAX;
    let mut node_count_max = 0u64;
    let mut node_count_sum = 0u64;
    let mut score_sum = 0f64;

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
        total_read += 1;

        match parse_record(&line) {
            Ok(Some(example)) => {
                parsed += 1;
                signatures.insert(example.signature);
                *categories.entry(example.category).or_insert(0) += 1;
                *triggers.entry(example.primary_trigger).or_insert(0) += 1;
                let node_count = example.workflow.nodes.len() as u64;
                node_count_min = node_count_min.min(node_count);
                node_count_max = node_count_max.max(node_count);
                node_count_sum += node_count;
                score_sum += example.score;
            }
            Ok(None) => skipped_empty += 1,
            Err(err) => {
                decode_errors += 1;
                warn!(line = index + 1, error = %err, "skipping undecodable record");
            }
        }
    }

    if parsed == 0 {
        node_count_min = 0;
    }
    let divisor = parsed.max(1) as f64;
    Ok(CorpusSummary {
        generated_at: Utc::now(),
        total_read,
        parsed,
        decode_errors,
        skipped_empty,
        unique_signatures: signatures.len() as u64,
        categories,
        triggers,
        node_count_min,
        node_count_max,
        node_count_mean: node_count_sum as f64 / divisor,
        score_mean: score_sum / divisor,
    })
}

/// Sectioned, terminal-friendly rendering of a summary.
pub fn render_text(summary: &CorpusSummary) -> String {
    let mut report = String::new();
    report.push_str("=== Corpus Summary ===\n\n");
    report.push_str(&format!("Total read:        {}\n", summary.total_read));
    report.push_str(&format!("Parsed:            {}\n", summary.parsed));
    report.push_str(&format!("Decode errors:     {}\n", summary.decode_errors));
    report.push_str(&format!("Empty artifacts:   {}\n", summary.skipped_empty));
    report.push_str(&format!("Unique signatures: {}\n", summary.unique_signatures));
    report.push_str(&format!(
        "Nodes per workflow: min {} / mean {:.1} / max {}\n",
        summary.node_count_min, summary.node_count_mean, summary.node_count_max
    ));
    report.push_str(&format!("Mean score:        {:.3}\n", summary.score_mean));
    report.push_str(&build_distribution_section("Categories", &summary.categories));
    report.push_str(&build_distribution_section("Triggers", &summary.triggers));
    report
}

/// JSON rendering of a summary.
pub fn render_json(summary: &CorpusSummary) -> Result<String, AppError> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

fn build_distribution_section(title: &str, distribution: &IndexMap<String, u64>) -> String {
    let mut section = format!("\n{title}:\n");
    if distribution.is_empty() {
        section.push_str("  (none)\n");
        return section;
    }
    let mut entries: Vec<(&String, &u64)> = distribution.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (name, count) in entries {
        section.push_str(&format!("  {name}: {count}\n"));
    }
    section
}

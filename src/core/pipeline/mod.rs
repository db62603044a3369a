#![allow(clippy::result_large_err)]

//! Two-pass batch pipeline: pass one parses and groups the corpus by
//! structural signature, pass two ranks each bucket, applies the variant cap,
//! normalizes the survivors, and writes the cleaned corpus incrementally.

use crate::core::config::CleanOptions;
use crate::core::corpus::{parse_record, CleanedExample, ParsedExample};
use crate::core::error::AppError;
use crate::core::normalize;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

const PROGRESS_INTERVAL: u64 = 10_000;

/// Run-wide counters, owned by the pipeline and returned to the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total_read: u64,
    pub decode_errors: u64,
    pub skipped_empty: u64,
    pub duplicates_removed: u64,
    pub names_fixed: u64,
    pub total_written: u64,
}

/// Clean a raw corpus file into a deduplicated, normalized corpus file.
///
/// Only opening the input and creating the output are fatal; individual bad
/// lines are counted and skipped.
pub fn clean_corpus(
    input: &Path,
    output: &Path,
    options: &CleanOptions,
) -> Result<RunStats, AppError> {
    options.validate()?;

    let input_file = File::open(input).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to open input {}: {}", input.display(), e),
        )
    })?;
    let mut stats = RunStats::default();
    let buckets = group_by_signature(BufReader::new(input_file), &mut stats);
    info!(
        read = stats.total_read,
        signatures = buckets.len(),
        "grouped corpus by structural signature"
    );

    let output_file = File::create(output).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to create output {}: {}", output.display(), e),
        )
    })?;
    let mut writer = BufWriter::new(output_file);

    for (_signature, bucket) in buckets {
        let kept = select_variants(bucket, options, &mut stats);
        for example in kept {
            let cleaned = normalize_example(example, options, &mut stats)?;
            let line = serde_json::to_string(&cleaned)?;
            writeln!(writer, "{line}").map_err(|e| {
                AppError::new(
                    ErrorCategory::IoError,
                    format!("failed to write {}: {}", output.display(), e),
                )
            })?;
            stats.total_written += 1;
        }
    }
    writer.flush().map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to flush {}: {}", output.display(), e),
        )
    })?;

    info!(written = stats.total_written, "cleaned corpus written");
    Ok(stats)
}

/// Pass one: decode every line and bucket it under its signature. Buckets
/// keep arrival order so ranking ties stay reproducible.
pub fn group_by_signature<R: BufRead>(
    reader: R,
    stats: &mut RunStats,
) -> IndexMap<String, Vec<ParsedExample>> {
    let mut buckets: IndexMap<String, Vec<ParsedExample>> = IndexMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                stats.decode_errors += 1;
                warn!(line = line_number, error = %err, "unreadable input line");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        stats.total_read += 1;

        match parse_record(&line) {
            Ok(Some(example)) => buckets
                .entry(example.signature.clone())
                .or_default()
                .push(example),
            Ok(None) => stats.skipped_empty += 1,
            Err(err) => {
                stats.decode_errors += 1;
                warn!(line = line_number, error = %err, "skipping undecodable record");
            }
        }

        if stats.total_read % PROGRESS_INTERVAL == 0 {
            info!(read = stats.total_read, "reading corpus");
        }
    }

    buckets
}

/// Rank a bucket by score descending (stable, so ties keep arrival order) and
/// apply the variant cap. With `dedupe` off the ranking still runs but
/// nothing is removed.
pub fn select_variants(
    mut bucket: Vec<ParsedExample>,
    options: &CleanOptions,
    stats: &mut RunStats,
) -> Vec<ParsedExample> {
    bucket.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if options.dedupe && bucket.len() > options.max_variants {
        stats.duplicates_removed += (bucket.len() - options.max_variants) as u64;
        bucket.truncate(options.max_variants);
    }
    bucket
}

/// Apply name correction, artifact projection, and instruction synthesis to
/// one retained example.
pub fn normalize_example(
    example: ParsedExample,
    options: &CleanOptions,
    stats: &mut RunStats,
) -> Result<CleanedExample, AppError> {
    let ParsedExample {
        mut workflow,
        primary_trigger,
        node_types,
        category,
        score,
        ..
    } = example;

    let original_name = normalize::effective_name(&workflow).to_string();
    let current_name = if options.fix_names {
        let fixed = normalize::fix_workflow_name(&original_name, &primary_trigger);
        if fixed != original_name {
            stats.names_fixed += 1;
            workflow.name = fixed.clone();
        }
        fixed
    } else {
        original_name
    };

    let artifact = if options.clean_output {
        normalize::compact_workflow(&workflow)
    } else {
        workflow
    };
    let output = serde_json::to_string(&artifact)?;

    let instruction = normalize::rebuild_instruction(
        &current_name,
        &category,
        &node_types,
        options.max_listed_types,
    );

    Ok(CleanedExample {
        instruction,
        output,
        category,
        score,
    })
}

/// Human-readable end-of-run report.
pub fn render_run_report(stats: &RunStats, input_bytes: u64, output_bytes: u64) -> String {
    let mut report = String::new();
    report.push_str("=== Cleaning Report ===\n\n");
    report.push_str(&format!("Total read:         {}\n", stats.total_read));
    report.push_str(&format!("Decode errors:      {}\n", stats.decode_errors));
    report.push_str(&format!("Empty artifacts:    {}\n", stats.skipped_empty));
    report.push_str(&format!("Duplicates removed: {}\n", stats.duplicates_removed));
    report.push_str(&format!("Names fixed:        {}\n", stats.names_fixed));
    report.push_str(&format!("Total written:      {}\n", stats.total_written));
    report.push_str(&build_size_section(input_bytes, output_bytes));
    report
}

fn build_size_section(input_bytes: u64, output_bytes: u64) -> String {
    let to_mib = |bytes: u64| bytes as f64 / (1024.0 * 1024.0);
    let mut section = format!(
        "\nSize: {:.1} MiB -> {:.1} MiB",
        to_mib(input_bytes),
        to_mib(output_bytes)
    );
    if input_bytes > 0 {
        section.push_str(&format!(
            " ({:.1}% reduction)",
            100.0 * (1.0 - output_bytes as f64 / input_bytes as f64)
        ));
    }
    section.push('\n');
    section
}

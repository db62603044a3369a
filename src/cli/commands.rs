use crate::{
    cli::args::{CleanArgs, ConvertArgs, ConvertFormat, InspectArgs, ReportFormat},
    core::{
        config::{CleanOptions, ConfigLoader},
        convert::{self, ChatSchema, ConvertOptions},
        inspect, pipeline,
    },
    Result,
};
use anyhow::bail;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn clean(args: CleanArgs) -> Result<()> {
    let config = ConfigLoader::load(args.config.as_deref())?;
    let mut options = config.clean;
    apply_clean_overrides(&mut options, &args);
    options.validate()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    info!(
        input = %args.input.display(),
        output = %output.display(),
        max_variants = options.max_variants,
        dedupe = options.dedupe,
        "cleaning corpus"
    );

    let stats = pipeline::clean_corpus(&args.input, &output, &options)?;

    let input_bytes = file_size(&args.input);
    let output_bytes = file_size(&output);
    println!(
        "{}",
        pipeline::render_run_report(&stats, input_bytes, output_bytes)
    );
    Ok(())
}

pub fn convert(args: ConvertArgs) -> Result<()> {
    if !(args.split_ratio > 0.0 && args.split_ratio <= 1.0) {
        bail!("--split-ratio must be in (0, 1], got {}", args.split_ratio);
    }

    let mut examples = convert::load_cleaned_corpus(&args.input)?;
    if let Some(max_examples) = args.max_examples {
        examples.truncate(max_examples);
    }
    if examples.is_empty() {
        warn!(input = %args.input.display(), "no usable examples; writing empty splits");
    }
    info!(examples = examples.len(), "loaded cleaned corpus");

    let options = ConvertOptions {
        split_ratio: args.split_ratio,
        seed: args.seed,
    };
    for schema in schemas_for(args.format) {
        let outcome = convert::convert_corpus(&examples, &args.output, schema, &options)?;
        println!(
            "{}: {} train -> {}",
            schema, outcome.train_count, outcome.train_path.display()
        );
        println!(
            "{}: {} val   -> {}",
            schema, outcome.val_count, outcome.val_path.display()
        );
    }
    Ok(())
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let summary = inspect::summarize_corpus(&args.input)?;
    let rendered = match args.format {
        ReportFormat::Text => inspect::render_text(&summary),
        ReportFormat::Json => inspect::render_json(&summary)?,
    };
    println!("{rendered}");
    Ok(())
}

fn apply_clean_overrides(options: &mut CleanOptions, args: &CleanArgs) {
    if let Some(max_variants) = args.max_variants {
        options.max_variants = max_variants;
    }
    if args.no_dedupe {
        options.dedupe = false;
    }
    if args.no_fix_names {
        options.fix_names = false;
    }
    if args.no_clean_output {
        options.clean_output = false;
    }
    if let Some(max_listed_types) = args.max_listed_types {
        options.max_listed_types = max_listed_types;
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("corpus");
    let file_name = format!("{stem}_clean.jsonl");
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

fn schemas_for(format: ConvertFormat) -> Vec<ChatSchema> {
    match format {
        ConvertFormat::Chatml => vec![ChatSchema::ChatMl],
        ConvertFormat::Vertex => vec![ChatSchema::Vertex],
        ConvertFormat::Openai => vec![ChatSchema::OpenAi],
        ConvertFormat::All => vec![ChatSchema::ChatMl, ChatSchema::Vertex, ChatSchema::OpenAi],
    }
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
}

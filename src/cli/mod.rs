pub mod args;
pub mod commands;

pub use args::{CleanArgs, ConvertArgs, InspectArgs};
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
CORPUS COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "flowsieve")]
#[command(version = crate::VERSION)]
#[command(about = "Workflow corpus cleaning toolkit for fine-tuning datasets")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: inspect a raw corpus, clean it, then convert the result for your tuning platform."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Deduplicate and normalize a raw corpus",
        long_about = "Clean groups examples by structural signature, keeps the highest-scored variants per group, repairs workflow names that contradict their trigger platform, and projects artifacts down to the fields that matter for training.",
        after_help = "Example:\n    flowsieve clean corpus.jsonl --output corpus_clean.jsonl --max-variants 3"
    )]
    Clean(CleanArgs),
    #[command(
        about = "Re-project a cleaned corpus into chat-turn tuning formats",
        long_about = "Convert shuffles a cleaned corpus with a seeded RNG, splits it into train/validation sets, and writes one JSONL pair per requested chat-turn schema.",
        after_help = "Example:\n    flowsieve convert corpus_clean.jsonl --format chatml --output finetune"
    )]
    Convert(ConvertArgs),
    #[command(
        about = "Summarize a raw corpus without modifying it",
        long_about = "Inspect makes a single read-only pass over a raw corpus and reports totals, signature cardinality, category and trigger distributions, and score/node-count aggregates.",
        after_help = "Example:\n    flowsieve inspect corpus.jsonl --format json"
    )]
    Inspect(InspectArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Clean(clean_args) => commands::clean(clean_args),
        Command::Convert(convert_args) => commands::convert(convert_args),
        Command::Inspect(inspect_args) => commands::inspect(inspect_args),
    }
}

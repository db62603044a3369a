use clap::Parser;
use flowsieve::{cli, logging};

fn main() {
    let args = cli::Args::parse();

    let _logging_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            None
        }
    };

    if let Err(err) = cli::run(args) {
        tracing::error!(error = %err, "run failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

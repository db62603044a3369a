pub mod config;

pub use config::{ConsoleOutput, LoggingConfig};

use crate::Result;
use anyhow::{anyhow, Context};
use std::fs::{create_dir_all, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::{LookupSpan, Registry};

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Layer type produced by the file sink builder.
type FileFmtLayer<S> =
    tracing_fmt::Layer<S, format::DefaultFields, format::Format<format::Full>, BoxMakeWriter>;

/// Guard that keeps the file sink flushing for the duration of the process.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging framework once per process.
///
/// Level precedence: `RUST_LOG`, then `FLOWSIEVE_LOG`, then the built-in
/// default. Errors when invoked more than once per process invocation.
pub fn init() -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let config = LoggingConfig::load()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    let (file_layer, file_guard) = match &config.log_file {
        Some(path) => {
            let (layer, guard) = file_layer::<Registry>(path)?;
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_writer = match config.console_output {
        ConsoleOutput::Stdout => BoxMakeWriter::new(io::stdout),
        ConsoleOutput::Stderr => BoxMakeWriter::new(io::stderr),
        ConsoleOutput::None => BoxMakeWriter::new(io::sink),
    };
    let console_layer = tracing_fmt::layer()
        .with_writer(console_writer)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(env_filter)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Build a tracing layer that writes to the provided file path via a
/// non-blocking writer.
fn file_layer<S>(log_file: &Path) -> Result<(FileFmtLayer<S>, WorkerGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(directory) = log_file.parent() {
        if !directory.as_os_str().is_empty() {
            create_dir_all(directory).with_context(|| {
                format!("failed to create log directory {}", directory.display())
            })?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let writer = BoxMakeWriter::new(move || non_blocking.clone());
    let layer = tracing_fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);
    Ok((layer, guard))
}

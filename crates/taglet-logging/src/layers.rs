// ABOUTME: Layer constructors for the different logging output formats
// ABOUTME: Stderr layer per ConsoleFormat, a non-blocking rolling file layer and the level filter

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
};

use crate::config::{ConsoleFormat, LoggingConfig};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Stderr layer in the requested format; `None` when console output is off.
pub fn create_console_layer(format: ConsoleFormat) -> Option<BoxedLayer> {
    let layer = match format {
        ConsoleFormat::Off => return None,
        ConsoleFormat::Compact => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact()
            .boxed(),
        ConsoleFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .pretty()
            .boxed(),
        ConsoleFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .boxed(),
    };

    Some(layer)
}

/// File layer writing through a non-blocking daily-rolling appender.
///
/// The returned guard flushes buffered records when dropped and must be kept
/// alive for as long as logging is wanted.
pub fn create_file_layer(path: &Path) -> Result<(BoxedLayer, WorkerGuard)> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(directory).with_context(|| {
        format!("Failed to create log directory: {}", directory.display())
    })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid log file path")?;

    let (writer, guard) = non_blocking(rolling::daily(directory, file_name));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Ok((layer, guard))
}

/// The configured level, refined by any extra directives.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .parse_lossy("");

    let extra = config.directives.as_deref().unwrap_or_default();
    for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let directive = directive
            .parse()
            .with_context(|| format!("Invalid filter directive '{directive}'"))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

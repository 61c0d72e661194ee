use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    field::RecordFields,
    fmt::{
        self,
        format::{DefaultFields, Writer},
        FormatFields,
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::{Config, LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the tracing subscriber: stdout in the configured format plus the
/// append-only log file when one is configured
pub fn init_telemetry(config: &LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid log level configuration")?;

    let mut layers = vec![stdout_layer(config.format)];

    if let Some(path) = config.log_file() {
        let file = open_log_file(Path::new(path))?;
        layers.push(file_layer(file));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        log_level = %config.level,
        log_format = ?config.format,
        log_file = config.log_file().unwrap_or("-"),
        "Telemetry initialized"
    );

    Ok(())
}

fn stdout_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_list(true)
            .flatten_event(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
    }
}

/// Field formatter for the log file
///
/// Span fields are cached per formatter type; a type of its own keeps the
/// stdout layer's ANSI styling out of the file.
struct PlainFields(DefaultFields);

impl<'writer> FormatFields<'writer> for PlainFields {
    fn format_fields<R: RecordFields>(&self, writer: Writer<'writer>, fields: R) -> std::fmt::Result {
        self.0.format_fields(writer, fields)
    }
}

/// Plain-text layer for the log file
fn file_layer(file: File) -> BoxedLayer {
    fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .fmt_fields(PlainFields(DefaultFields::new()))
        .with_writer(Mutex::new(file))
        .boxed()
}

/// Open the log file for appending, creating it and its directory if missing
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Log server startup information
pub fn log_startup_info(config: &Config) {
    tracing::info!(
        server_address = %config.server_address(),
        database_url = %config.database_url(),
        max_connections = config.database.max_connections,
        connection_timeout = config.database.connection_timeout,
        "Todo server starting up"
    );
}

/// Log configuration validation
pub fn log_config_validation(config: &Config) {
    match config.validate() {
        Ok(()) => {
            tracing::info!("Configuration validation passed");
        }
        Err(e) => {
            tracing::error!(error = %e, "Configuration validation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("log.txt");

        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "first").unwrap();
        }
        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_file_layer_writes_plain_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let file = open_log_file(&path).unwrap();

        let subscriber = Registry::default().with(file_layer(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("abc /add?task=x Time=0.42 ms status_code=200");
            tracing::error!("abc /delete?todo_id=9 err=\"Todo with ID 9 not found\"");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" INFO "));
        assert!(lines[0].ends_with("abc /add?task=x Time=0.42 ms status_code=200"));
        assert!(lines[1].contains("ERROR"));
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn test_file_lines_stay_plain_next_to_coloured_stdout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let file = open_log_file(&path).unwrap();

        // The coloured layer formats span fields first
        let layers: Vec<BoxedLayer> = vec![
            fmt::layer()
                .with_ansi(true)
                .with_writer(std::io::sink)
                .boxed(),
            stdout_layer(LogFormat::Compact),
            file_layer(file),
        ];
        let subscriber = Registry::default().with(layers);

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("request", correlation_id = %"abc", method = %"POST");
            span.in_scope(|| {
                tracing::info!("abc /add?task=x Time=0.42 ms status_code=200");
            });
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains('\u{1b}'), "{contents:?}");
        assert!(contents.contains("request{correlation_id=abc method=POST}"), "{contents:?}");
        assert!(contents.trim_end().ends_with("abc /add?task=x Time=0.42 ms status_code=200"));
    }

    #[test]
    fn test_stdout_layer_for_each_format() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            let subscriber = Registry::default().with(stdout_layer(format));
            tracing::subscriber::with_default(subscriber, || {
                tracing::debug!(?format, "layer built");
            });
        }
    }
}

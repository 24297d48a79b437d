//! Diagnostics setup for the CLI.
//!
//! Logs always go to stderr or a file so that stdout carries nothing but
//! command results.

use crate::constants;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

/// `-v` selects debug and `-vv` trace; without flags `OASTOOL_LOG` is used
fn filter_directive(verbosity: u8) -> String {
    match verbosity {
        0 => std::env::var(constants::ENV_OASTOOL_LOG)
            .unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn log_format() -> LogFormat {
    let Ok(raw) = std::env::var(constants::ENV_OASTOOL_LOG_FORMAT) else {
        return LogFormat::Text;
    };
    match raw.to_lowercase().as_str() {
        "json" => LogFormat::Json,
        "text" => LogFormat::Text,
        other => {
            // The subscriber is not installed yet
            // ast-grep-ignore: no-println
            eprintln!(
                "Warning: Unrecognized {} '{other}'. Valid values: 'json', 'text'. Using 'text'.",
                constants::ENV_OASTOOL_LOG_FORMAT
            );
            LogFormat::Text
        }
    }
}

fn log_writer() -> BoxMakeWriter {
    let Ok(path) = std::env::var(constants::ENV_OASTOOL_LOG_FILE) else {
        return BoxMakeWriter::new(std::io::stderr);
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            // ast-grep-ignore: no-println
            eprintln!("Warning: Could not open log file '{path}': {e}. Using stderr.");
            BoxMakeWriter::new(std::io::stderr)
        }
    }
}

/// Installs the global subscriber.
///
/// `OASTOOL_LOG_FORMAT` picks `text` or `json`; `OASTOOL_LOG_FILE` appends
/// to a file instead of stderr.
pub fn init_tracing(verbosity: u8) {
    let directive = filter_directive(verbosity);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format() {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_span_list(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(log_writer()),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(log_writer()),
            )
            .init(),
    }
}

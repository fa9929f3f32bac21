// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::env;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, Registry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILTER_ENV_VAR: &str = "LOGFETCH_LOG";
const LOG_FORMAT_ENV_VAR: &str = "LOGFETCH_LOG_FORMAT";
const LOG_SPAN_EVENTS_ENV_VAR: &str = "LOGFETCH_LOG_SPAN_EVENTS";
const LOG_FILE_ENV_VAR: &str = "LOGFETCH_LOG_FILE";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Installs the global subscriber. Console output goes to stderr so stdout
/// only carries the remote glob and file listing.
///
/// The returned guard flushes the `LOGFETCH_LOG_FILE` sink when dropped and
/// must outlive every event that should reach the file.
#[must_use = "dropping the guard stops the log file writer"]
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let filter = build_filter(env::var(LOG_FILTER_ENV_VAR).ok(), verbose);
    let span_events = parse_span_events(env::var(LOG_SPAN_EVENTS_ENV_VAR).ok().as_deref());
    let format = parse_format(env::var(LOG_FORMAT_ENV_VAR).ok().as_deref());
    let file_writer = build_file_writer(env::var(LOG_FILE_ENV_VAR).ok().as_deref());
    let registry = Registry::default()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_span_events(span_events.clone());

    match (format, file_writer) {
        (LogFormat::Json, Some((writer, guard))) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_timer(UtcTime::rfc_3339())
                .with_span_events(span_events)
                .with_writer(writer);
            registry.with(console.json()).with(file_layer).init();
            Some(guard)
        }
        (LogFormat::Json, None) => {
            registry.with(console.json()).init();
            None
        }
        (LogFormat::Pretty, Some((writer, guard))) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_ansi(false)
                .with_timer(UtcTime::rfc_3339())
                .with_span_events(span_events)
                .with_writer(writer);
            registry.with(console.pretty()).with(file_layer).init();
            Some(guard)
        }
        (LogFormat::Pretty, None) => {
            registry.with(console.pretty()).init();
            None
        }
        (LogFormat::Compact, Some((writer, guard))) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_timer(UtcTime::rfc_3339())
                .with_span_events(span_events)
                .with_writer(writer);
            registry.with(console.compact()).with(file_layer).init();
            Some(guard)
        }
        (LogFormat::Compact, None) => {
            registry.with(console.compact()).init();
            None
        }
    }
}

/// `LOGFETCH_LOG` wins; otherwise `debug` when verbose and `info` when not.
fn build_filter(directive: Option<String>, verbose: bool) -> EnvFilter {
    match directive.filter(|value| !value.trim().is_empty()) {
        Some(value) => EnvFilter::new(value),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("info"),
    }
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_ascii_lowercase())
}

fn parse_format(value: Option<&str>) -> LogFormat {
    match normalized(value).as_deref() {
        Some("json") => LogFormat::Json,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::Compact,
    }
}

fn parse_span_events(value: Option<&str>) -> FmtSpan {
    match normalized(value).as_deref() {
        Some("new") => FmtSpan::NEW,
        Some("enter") => FmtSpan::ENTER,
        Some("exit") => FmtSpan::EXIT,
        Some("close") => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

fn build_file_writer(value: Option<&str>) -> Option<(NonBlocking, WorkerGuard)> {
    let file_path = value
        .map(str::trim)
        .filter(|value| !value.is_empty())?;
    let path = Path::new(file_path);
    let file_name = path.file_name()?.to_string_lossy().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let appender = tracing_appender::rolling::never(dir, file_name);
    Some(tracing_appender::non_blocking(appender))
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::sync::Arc;

use logfetch::adapters;
use logfetch::app::errors::{EXIT_CODE_FAILURE, EXIT_CODE_OK};
use logfetch::app::usecases::UseCases;
use logfetch::{config, logging};

fn log_config_report(report: &config::ConfigReport) {
    match (&report.config_path, report.config_path_source) {
        (Some(path), Some(source)) => {
            tracing::debug!(
                "config path: {} (source={}, present={})",
                path.display(),
                source.as_str(),
                report.config_file_present
            );
        }
        (Some(path), None) => {
            tracing::debug!(
                "config path: {} (present={})",
                path.display(),
                report.config_file_present
            );
        }
        (None, _) => {
            tracing::debug!("config path: (none)");
        }
    }
    tracing::debug!(
        "config host: {} (source={})",
        report.host.value,
        report.host.source.as_str()
    );
    tracing::debug!(
        "config base_path: {} (source={})",
        report.base_path.value,
        report.base_path.source.as_str()
    );
    tracing::debug!(
        "config job_marker: {} (source={})",
        report.job_marker.value,
        report.job_marker.source.as_str()
    );
    tracing::debug!(
        "config verbose: {} (source={})",
        report.verbose.value,
        report.verbose.source.as_str()
    );
}

/// Runs one fetch and returns the process exit status. The log file guard
/// lives in this frame so the file sink is flushed before the caller exits.
async fn run() -> i32 {
    let parsed = adapters::cli::parse_opts();
    let config::LoadResult { config, report } = match config::load_with_report(
        parsed.opts.config.clone(),
        config::Overrides {
            verbose: parsed.verbose_override,
        },
    ) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("logfetch: {err:#}");
            return EXIT_CODE_FAILURE;
        }
    };
    let run = match parsed.opts.into_run_config(config.verbose) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("logfetch: {err}");
            eprintln!("{}", adapters::cli::usage());
            return err.exit_code();
        }
    };

    let _log_guard = logging::init(config.verbose);
    log_config_report(&report);

    let ssh = adapters::ssh::SshAdapter::new(config.ssh_program.clone(), config.ssh_options.clone());
    let rsync = adapters::rsync::RsyncAdapter::new(config.rsync_program.clone(), ssh.remote_shell());
    let usecases = UseCases::new(
        Arc::new(ssh),
        Arc::new(rsync),
        Arc::new(adapters::fs::LocalFilesystem::new()),
        Arc::new(adapters::terminal::TerminalOutput::new()),
        Arc::new(adapters::telemetry::TracingTelemetry::new()),
        config.site(),
    );

    match usecases.fetch(&run).await {
        Ok(outcome) => {
            tracing::debug!(
                "fetched {} of {} file(s) from {}",
                outcome.transferred,
                outcome.files.len(),
                outcome.remote_glob
            );
            EXIT_CODE_OK
        }
        Err(err) => {
            tracing::debug!(code = err.code(), "fetch failed");
            eprintln!("logfetch: {err}");
            err.exit_code()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = run().await;
    std::process::exit(code);
}

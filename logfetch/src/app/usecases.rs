// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::errors::{AppError, AppResult};
use crate::app::ports::{
    ExecCapture, FileSyncPort, LocalFilesystemPort, OutputPort, RemoteExecPort, TelemetryEvent,
    TelemetryPort,
};
use crate::app::services::{patterns, remote_path, version_sort};
use crate::app::types::{
    FetchOutcome, RemoteCommand, RemoteHost, RunConfig, SiteConfig, TransferOptions,
};

#[derive(Clone)]
pub struct UseCases {
    pub(crate) remote_exec: Arc<dyn RemoteExecPort>,
    pub(crate) file_sync: Arc<dyn FileSyncPort>,
    pub(crate) local_fs: Arc<dyn LocalFilesystemPort>,
    pub(crate) output: Arc<dyn OutputPort>,
    pub(crate) telemetry: Arc<dyn TelemetryPort>,
    pub(crate) site: SiteConfig,
}

impl UseCases {
    pub fn new(
        remote_exec: Arc<dyn RemoteExecPort>,
        file_sync: Arc<dyn FileSyncPort>,
        local_fs: Arc<dyn LocalFilesystemPort>,
        output: Arc<dyn OutputPort>,
        telemetry: Arc<dyn TelemetryPort>,
        site: SiteConfig,
    ) -> Self {
        Self {
            remote_exec,
            file_sync,
            local_fs,
            output,
            telemetry,
            site,
        }
    }

    /// Resolves, enumerates and transfers the logs of the latest job run.
    pub async fn fetch(&self, run: &RunConfig) -> AppResult<FetchOutcome> {
        let host = RemoteHost::new(&run.username, &self.site.host);
        let pipeline = self
            .resolve_pipeline(&host, &self.site.base_path, &run.pipeline_pattern)
            .await?;
        let project_path =
            remote_path::join(&self.site.base_path, &[pipeline.as_str(), run.project.as_str()]);
        let job = self.resolve_job(&host, &project_path, &run.session).await?;
        let job_path = remote_path::join(&project_path, &[job.as_str()]);
        let glob_prefix = remote_path::job_glob_prefix(&job_path, &self.site.job_marker);
        let remote_glob = format!("{glob_prefix}*");
        self.output.remote_path(&remote_glob).await?;

        let pattern = patterns::aggregate(&run.file_regexes);
        let files = self.enumerate_files(&host, glob_prefix, &pattern).await?;
        let telemetry_base = TelemetryEvent {
            pipeline: Some(pipeline.clone()),
            project: Some(run.project.clone()),
            session: Some(run.session.clone()),
            job: Some(job.clone()),
            remote_path: Some(remote_glob.clone()),
            file_count: Some(files.len()),
        };
        if files.is_empty() {
            tracing::warn!(
                "no files matching {} found under {}",
                pattern,
                remote_glob
            );
            self.telemetry.event("files.none", telemetry_base);
            return Ok(FetchOutcome {
                pipeline,
                job,
                remote_glob,
                files,
                transferred: 0,
            });
        }
        self.telemetry
            .event("files.enumerated", telemetry_base.clone());

        if run.verbose {
            self.output.file_list(&files).await?;
        }
        let options = TransferOptions {
            dry_run: run.dry_run,
            verbose: run.verbose,
        };
        let transferred = self
            .transfer_files(&host, &files, &run.destination, options)
            .await?;
        self.telemetry.event("transfer.completed", telemetry_base);

        Ok(FetchOutcome {
            pipeline,
            job,
            remote_glob,
            files,
            transferred,
        })
    }

    /// Finds the single directory under `base_path` whose name contains
    /// `pattern`, ignoring case.
    pub async fn resolve_pipeline(
        &self,
        host: &RemoteHost,
        base_path: &str,
        pattern: &str,
    ) -> AppResult<String> {
        let names = self.list_child_dirs(host, base_path).await?;
        let matches: Vec<String> = names
            .into_iter()
            .filter(|name| patterns::contains_ignore_case(name, pattern))
            .collect();
        match matches.as_slice() {
            [] => Err(AppError::not_found(format!(
                "no pipeline directory matching '{pattern}' under {base_path}"
            ))),
            [single] => {
                tracing::info!("pipeline resolved pattern={} name={}", pattern, single);
                self.telemetry.event(
                    "pipeline.resolved",
                    TelemetryEvent {
                        pipeline: Some(single.clone()),
                        remote_path: Some(base_path.to_string()),
                        ..TelemetryEvent::default()
                    },
                );
                Ok(single.clone())
            }
            many => Err(AppError::ambiguous(format!(
                "pattern '{pattern}' matches {} pipeline directories under {base_path}: {}; use a more specific pattern",
                many.len(),
                many.join(", ")
            ))),
        }
    }

    /// Picks the version-latest job directory for `session` under the project path.
    pub async fn resolve_job(
        &self,
        host: &RemoteHost,
        project_path: &str,
        session: &str,
    ) -> AppResult<String> {
        let marker = self.site.job_marker.as_str();
        let mut candidates: Vec<String> = self
            .list_child_dirs(host, project_path)
            .await?
            .into_iter()
            .filter(|name| name.contains(session) && name.ends_with(marker))
            .collect();
        version_sort::sort(&mut candidates);
        tracing::debug!(
            "job candidates session={} count={} names={:?}",
            session,
            candidates.len(),
            candidates
        );
        let Some(latest) = candidates.pop() else {
            return Err(AppError::not_found(format!(
                "no job directory for session '{session}' ending in {marker} under {project_path}"
            )));
        };
        tracing::info!("job resolved session={} name={}", session, latest);
        self.telemetry.event(
            "job.resolved",
            TelemetryEvent {
                session: Some(session.to_string()),
                job: Some(latest.clone()),
                remote_path: Some(project_path.to_string()),
                ..TelemetryEvent::default()
            },
        );
        Ok(latest)
    }

    /// Lists every regular file under `<glob_prefix>*` and keeps the paths
    /// matching `pattern`, in listing order.
    pub async fn enumerate_files(
        &self,
        host: &RemoteHost,
        glob_prefix: &str,
        pattern: &str,
    ) -> AppResult<Vec<String>> {
        let regex = patterns::compile(pattern)?;
        let command = RemoteCommand::new("find")
            .arg("-L")
            .glob(glob_prefix)
            .arg("-type")
            .arg("f");
        let capture = self.remote_exec.exec_capture(host, &command).await?;
        let lines = capture.stdout_lines();
        if capture.exit_code != 0 {
            if lines.is_empty() {
                return Err(remote_command_failed("file listing", &capture));
            }
            tracing::warn!(
                "file listing was incomplete exit_code={} stderr={}",
                capture.exit_code,
                capture.stderr_text()
            );
        }
        let total = lines.len();
        let files = patterns::filter_lines(lines, &regex);
        tracing::debug!(
            "files enumerated listed={} matched={} pattern={}",
            total,
            files.len(),
            pattern
        );
        Ok(files)
    }

    /// Copies each file to `destination/<basename>`, one at a time, stopping
    /// at the first failure.
    pub async fn transfer_files(
        &self,
        host: &RemoteHost,
        files: &[String],
        destination: &Path,
        options: TransferOptions,
    ) -> AppResult<usize> {
        self.local_fs.ensure_dir(destination).await?;
        for (index, remote) in files.iter().enumerate() {
            let local = local_target(remote, destination)?;
            tracing::info!(
                "transferring {}/{} remote={} local={} dry_run={}",
                index + 1,
                files.len(),
                remote,
                local.display(),
                options.dry_run
            );
            self.file_sync
                .retrieve_file(host, remote, &local, options)
                .await?;
        }
        Ok(files.len())
    }

    async fn list_child_dirs(&self, host: &RemoteHost, path: &str) -> AppResult<Vec<String>> {
        // `-L` so symlinked pipeline and job directories count as directories.
        let command = RemoteCommand::new("find")
            .arg("-L")
            .arg(path)
            .arg("-mindepth")
            .arg("1")
            .arg("-maxdepth")
            .arg("1")
            .arg("-type")
            .arg("d")
            .arg("-printf")
            .arg("%f\\n");
        let capture = self.remote_exec.exec_capture(host, &command).await?;
        if capture.exit_code != 0 {
            return Err(remote_command_failed(
                &format!("directory listing of {path}"),
                &capture,
            ));
        }
        Ok(capture.stdout_lines())
    }
}

fn remote_command_failed(what: &str, capture: &ExecCapture) -> AppError {
    AppError::remote(format!("{what} failed")).with_context(format!(
        "exit code {}: {}",
        capture.exit_code,
        capture.stderr_text()
    ))
}

fn local_target(remote: &str, destination: &Path) -> AppResult<PathBuf> {
    Path::new(remote)
        .file_name()
        .map(|name| destination.join(name))
        .ok_or_else(|| AppError::local(format!("remote path has no file name: {remote}")))
}

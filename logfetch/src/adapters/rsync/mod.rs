// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::ffi::OsString;
use std::path::Path;

use async_trait::async_trait;

use crate::adapters::process;
use crate::app::errors::{AppError, AppResult};
use crate::app::ports::FileSyncPort;
use crate::app::types::{RemoteHost, TransferOptions};

/// Copies remote files with `rsync` over the configured ssh client.
#[derive(Clone, Debug)]
pub struct RsyncAdapter {
    program: String,
    remote_shell: String,
}

impl RsyncAdapter {
    pub fn new(program: impl Into<String>, remote_shell: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            remote_shell: remote_shell.into(),
        }
    }

    /// Archive mode, compression and progress, plus the dry-run/verbose modifiers.
    /// `--protect-args` keeps the remote shell from splitting or expanding the path.
    pub fn transfer_args(
        &self,
        host: &RemoteHost,
        remote_path: &str,
        local_path: &Path,
        options: TransferOptions,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--archive".into(),
            "--compress".into(),
            "--progress".into(),
            "--protect-args".into(),
            "--rsh".into(),
            self.remote_shell.clone().into(),
        ];
        if options.dry_run {
            args.push("--dry-run".into());
        }
        if options.verbose {
            args.push("--verbose".into());
        }
        args.push("--".into());
        args.push(format!("{host}:{remote_path}").into());
        args.push(local_path.as_os_str().to_os_string());
        args
    }
}

impl Default for RsyncAdapter {
    fn default() -> Self {
        Self::new("rsync", "ssh -o BatchMode=yes")
    }
}

#[async_trait]
impl FileSyncPort for RsyncAdapter {
    #[tracing::instrument(
        name = "rsync",
        level = "debug",
        skip(self, host, remote_path, local_path),
        fields(op = "retrieve_file", host = %host, path = %remote_path, dry_run = options.dry_run)
    )]
    async fn retrieve_file(
        &self,
        host: &RemoteHost,
        remote_path: &str,
        local_path: &Path,
        options: TransferOptions,
    ) -> AppResult<()> {
        let args = self.transfer_args(host, remote_path, local_path, options);
        match process::run_attached(&self.program, &args).await {
            Ok(0) => Ok(()),
            Ok(code) => Err(AppError::transfer(
                format!("rsync exited with status {code} while copying {remote_path}"),
                Some(code),
            )),
            Err(err) => Err(AppError::transfer(
                format!("remote retrieve failed: {err}"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::errors::AppErrorKind;

    fn host() -> RemoteHost {
        RemoteHost::new("alice", "login.cluster.example")
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn plain_transfer_uses_archive_compression_and_progress() {
        let adapter = RsyncAdapter::default();
        let args = adapter.transfer_args(
            &host(),
            "/data/p/run_1_CHECK_DATA/job.stdout",
            Path::new("logs/job.stdout"),
            TransferOptions::default(),
        );
        assert_eq!(
            strings(args),
            vec![
                "--archive",
                "--compress",
                "--progress",
                "--protect-args",
                "--rsh",
                "ssh -o BatchMode=yes",
                "--",
                "alice@login.cluster.example:/data/p/run_1_CHECK_DATA/job.stdout",
                "logs/job.stdout",
            ]
        );
    }

    #[test]
    fn dry_run_and_verbose_are_passed_through() {
        let adapter = RsyncAdapter::new("rsync", "ssh -o BatchMode=yes -p 2222");
        let args = strings(adapter.transfer_args(
            &host(),
            "/r/a.stderr",
            Path::new("a.stderr"),
            TransferOptions {
                dry_run: true,
                verbose: true,
            },
        ));
        assert!(args.contains(&"--dry-run".to_string()));
        assert!(args.contains(&"--verbose".to_string()));
        assert!(args.contains(&"ssh -o BatchMode=yes -p 2222".to_string()));
        let terminator = args.iter().position(|arg| arg == "--").unwrap();
        assert_eq!(args.len(), terminator + 3);
    }

    #[tokio::test]
    async fn missing_rsync_binary_fails_the_transfer() {
        let adapter = RsyncAdapter::new("logfetch-no-such-rsync", "ssh");
        let err = adapter
            .retrieve_file(&host(), "/r/a", Path::new("a"), TransferOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::Transfer);
        assert_eq!(err.exit_code(), 1);
    }
}

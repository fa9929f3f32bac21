// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::ffi::OsString;

use async_trait::async_trait;

use crate::adapters::process::{self, ProcessError};
use crate::app::errors::{AppError, AppResult};
use crate::app::ports::{ExecCapture, RemoteExecPort};
use crate::app::services::shell;
use crate::app::types::{RemoteCommand, RemoteHost};

/// Exit status `ssh` reserves for its own failures.
const SSH_FAILURE_EXIT_CODE: i32 = 255;

/// Runs remote commands through the local `ssh` client.
/// Authentication is expected to be key based; batch mode refuses to prompt.
#[derive(Clone, Debug)]
pub struct SshAdapter {
    program: String,
    options: Vec<String>,
}

impl SshAdapter {
    pub fn new(program: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    /// `ssh` invocation used by rsync as its remote shell, each word quoted
    /// for rsync's own `--rsh` splitting.
    pub fn remote_shell(&self) -> String {
        [self.program.as_str(), "-o", "BatchMode=yes"]
            .into_iter()
            .chain(self.options.iter().map(String::as_str))
            .map(rsh_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn command_args(&self, host: &RemoteHost, command: &RemoteCommand) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-o".into(), "BatchMode=yes".into()];
        args.extend(self.options.iter().map(OsString::from));
        args.push("--".into());
        args.push(host.to_string().into());
        args.push(shell::render(command).into());
        args
    }
}

impl Default for SshAdapter {
    fn default() -> Self {
        Self::new("ssh", Vec::new())
    }
}

/// rsync splits `--rsh` on spaces, honours single and double quotes and reads
/// a doubled quote inside quotes as a literal one. Backslashes are not special.
fn rsh_quote(word: &str) -> String {
    if !word.is_empty() && !word.contains([' ', '\t', '\'', '"']) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', "''"))
}

fn map_process_error(err: ProcessError) -> AppError {
    AppError::remote(format!("ssh exec failed: {err}"))
}

#[async_trait]
impl RemoteExecPort for SshAdapter {
    #[tracing::instrument(
        name = "ssh",
        level = "debug",
        skip(self, host, command),
        fields(op = "exec_capture", user = host.username(), host = host.host(), program = %command.program)
    )]
    async fn exec_capture(
        &self,
        host: &RemoteHost,
        command: &RemoteCommand,
    ) -> AppResult<ExecCapture> {
        let args = self.command_args(host, command);
        tracing::debug!("remote command {}", shell::render(command));
        let output = process::run_capture(&self.program, &args)
            .await
            .map_err(map_process_error)?;
        let capture = ExecCapture {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
        };
        if capture.exit_code == SSH_FAILURE_EXIT_CODE {
            return Err(AppError::remote(format!("ssh connection to {host} failed"))
                .with_context(capture.stderr_text()));
        }
        Ok(capture)
    }
}

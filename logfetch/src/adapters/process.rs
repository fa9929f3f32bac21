// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::ffi::OsString;
use std::process::Stdio;

use thiserror::Error as ThisError;
use tokio::process::Command;

#[derive(Debug, ThisError)]
pub enum ProcessError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} was terminated by a signal")]
    Signaled { program: String },
}

#[derive(Debug)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

/// Runs `program` to completion with stdin closed, capturing both streams.
pub async fn run_capture(program: &str, args: &[OsString]) -> Result<ProcessOutput, ProcessError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;
    let exit_code = output.status.code().ok_or_else(|| ProcessError::Signaled {
        program: program.to_string(),
    })?;
    Ok(ProcessOutput {
        stdout: output.stdout,
        stderr: output.stderr,
        exit_code,
    })
}

/// Runs `program` to completion with its output shown on our stderr.
pub async fn run_attached(program: &str, args: &[OsString]) -> Result<i32, ProcessError> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(std::io::stderr())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;
    status.code().ok_or_else(|| ProcessError::Signaled {
        program: program.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_output_and_exit_code() {
        let args: Vec<OsString> = vec!["-c".into(), "printf out; printf err >&2; exit 3".into()];
        let output = run_capture("sh", &args).await.unwrap();
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr, b"err");
        assert_eq!(output.exit_code, 3);
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let err = run_capture("logfetch-no-such-program", &[]).await.unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert!(err.to_string().contains("logfetch-no-such-program"));
    }

    #[tokio::test]
    async fn attached_run_reports_exit_code() {
        let args: Vec<OsString> = vec!["-c".into(), "exit 23".into()];
        assert_eq!(run_attached("sh", &args).await.unwrap(), 23);
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::io::Write;

use async_trait::async_trait;

use crate::app::errors::{AppError, AppResult};
use crate::app::ports::OutputPort;

/// Writes operational results to stdout, one per line.
#[derive(Clone, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

fn write_lines<'a>(
    mut out: impl Write,
    lines: impl IntoIterator<Item = &'a str>,
) -> AppResult<()> {
    for line in lines {
        writeln!(out, "{line}")
            .map_err(|err| AppError::local(format!("failed to write to stdout: {err}")))?;
    }
    out.flush()
        .map_err(|err| AppError::local(format!("failed to flush stdout: {err}")))
}

#[async_trait]
impl OutputPort for TerminalOutput {
    async fn remote_path(&self, path: &str) -> AppResult<()> {
        write_lines(std::io::stdout().lock(), [path])
    }

    async fn file_list(&self, files: &[String]) -> AppResult<()> {
        write_lines(std::io::stdout().lock(), files.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_entry() {
        let mut out: Vec<u8> = Vec::new();
        write_lines(&mut out, ["/data/p/proj1/run_10*"]).unwrap();
        let files = ["/r/a.stdout".to_string(), "/r/a.stderr".to_string()];
        write_lines(&mut out, files.iter().map(String::as_str)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/data/p/proj1/run_10*\n/r/a.stdout\n/r/a.stderr\n"
        );
    }

    #[test]
    fn empty_list_writes_nothing() {
        let mut out: Vec<u8> = Vec::new();
        write_lines(&mut out, std::iter::empty::<&str>()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn write_failure_is_a_local_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = write_lines(Closed, ["x"]).unwrap_err();
        assert_eq!(err.kind(), crate::app::errors::AppErrorKind::Local);
    }
}

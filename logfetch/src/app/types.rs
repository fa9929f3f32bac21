// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_FILE_REGEXES: [&str; 2] = ["stdout$", "stderr$"];
pub const DEFAULT_JOB_MARKER: &str = "_CHECK_DATA";

/// One fetch request, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub username: String,
    pub project: String,
    pub pipeline_pattern: String,
    pub session: String,
    pub file_regexes: Vec<String>,
    pub destination: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Cluster-side settings that do not change between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub host: String,
    pub base_path: String,
    pub job_marker: String,
}

/// `user@host` login target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHost {
    username: String,
    host: String,
}

impl RemoteHost {
    pub fn new(username: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            host: host.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for RemoteHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.host)
    }
}

/// Argument to a remote command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteArg {
    /// Passed to the remote shell as a single quoted word.
    Literal(String),
    /// Quoted prefix followed by an unquoted `*`, so the remote shell expands it.
    Glob(String),
}

/// A command executed by the remote login shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    pub program: String,
    pub args: Vec<RemoteArg>,
}

impl RemoteCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(RemoteArg::Literal(value.into()));
        self
    }

    pub fn glob(mut self, prefix: impl Into<String>) -> Self {
        self.args.push(RemoteArg::Glob(prefix.into()));
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferOptions {
    pub dry_run: bool,
    pub verbose: bool,
}

/// Result of a complete fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub pipeline: String,
    pub job: String,
    pub remote_glob: String,
    pub files: Vec<String>,
    pub transferred: usize,
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::fmt;

pub const EXIT_CODE_OK: i32 = 0;
pub const EXIT_CODE_FAILURE: i32 = 1;

pub mod codes {
    pub const USAGE: &str = "usage";
    pub const NOT_FOUND: &str = "not_found";
    pub const AMBIGUOUS_MATCH: &str = "ambiguous_match";
    pub const INVALID_PATTERN: &str = "invalid_pattern";
    pub const REMOTE_ERROR: &str = "remote_error";
    pub const LOCAL_ERROR: &str = "local_error";
    pub const TRANSFER_FAILED: &str = "transfer_failed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorKind {
    Usage,
    NotFound,
    Ambiguous,
    InvalidPattern,
    Remote,
    Local,
    Transfer,
}

#[derive(Debug, Clone)]
pub struct AppError {
    kind: AppErrorKind,
    code: &'static str,
    message: String,
    context: Option<String>,
    exit_code: i32,
}

impl AppError {
    pub fn with_message(
        kind: AppErrorKind,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            context: None,
            exit_code: EXIT_CODE_FAILURE,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::Usage, codes::USAGE, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::NotFound, codes::NOT_FOUND, message)
    }

    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::Ambiguous, codes::AMBIGUOUS_MATCH, message)
    }

    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::InvalidPattern, codes::INVALID_PATTERN, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::Remote, codes::REMOTE_ERROR, message)
    }

    pub fn local(message: impl Into<String>) -> Self {
        Self::with_message(AppErrorKind::Local, codes::LOCAL_ERROR, message)
    }

    /// Transfer failures keep the exit status of the sync tool.
    pub fn transfer(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        let exit_code = match exit_code {
            Some(code) if code != EXIT_CODE_OK => code,
            _ => EXIT_CODE_FAILURE,
        };
        Self::with_message(AppErrorKind::Transfer, codes::TRANSFER_FAILED, message)
            .with_exit_code(exit_code)
    }

    pub fn kind(&self) -> AppErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ctx) = &self.context {
            write!(f, "{} ({})", self.message, ctx)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_errors_exit_with_one() {
        assert_eq!(AppError::not_found("x").exit_code(), EXIT_CODE_FAILURE);
        assert_eq!(AppError::ambiguous("x").exit_code(), EXIT_CODE_FAILURE);
        assert_eq!(AppError::usage("x").exit_code(), EXIT_CODE_FAILURE);
    }

    #[test]
    fn transfer_error_keeps_tool_status() {
        let err = AppError::transfer("rsync failed", Some(23));
        assert_eq!(err.kind(), AppErrorKind::Transfer);
        assert_eq!(err.code(), codes::TRANSFER_FAILED);
        assert_eq!(err.exit_code(), 23);
    }

    #[test]
    fn transfer_error_without_status_exits_with_one() {
        assert_eq!(AppError::transfer("killed", None).exit_code(), 1);
        assert_eq!(AppError::transfer("odd", Some(0)).exit_code(), 1);
    }

    #[test]
    fn display_includes_context() {
        let err = AppError::remote("listing failed").with_context("exit code 2");
        assert_eq!(err.to_string(), "listing failed (exit code 2)");
        assert_eq!(err.context(), Some("exit code 2"));
    }
}

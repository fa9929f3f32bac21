// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use async_trait::async_trait;

use crate::app::errors::AppResult;

#[async_trait]
/// Operational output of a run. Diagnostics go through tracing instead.
pub trait OutputPort: Send + Sync {
    async fn remote_path(&self, path: &str) -> AppResult<()>;
    async fn file_list(&self, files: &[String]) -> AppResult<()>;
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use async_trait::async_trait;
use std::path::Path;

use crate::app::errors::AppResult;
use crate::app::types::{RemoteHost, TransferOptions};

#[async_trait]
/// File transfer boundary between remote and local paths.
/// One call copies one remote file; progress is shown on the terminal by the adapter.
pub trait FileSyncPort: Send + Sync {
    async fn retrieve_file(
        &self,
        host: &RemoteHost,
        remote_path: &str,
        local_path: &Path,
        options: TransferOptions,
    ) -> AppResult<()>;
}

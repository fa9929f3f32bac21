// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod file_sync;
pub mod local_fs;
pub mod output;
pub mod remote_exec;
pub mod telemetry;

pub use file_sync::FileSyncPort;
pub use local_fs::LocalFilesystemPort;
pub use output::OutputPort;
pub use remote_exec::{ExecCapture, RemoteExecPort};
pub use telemetry::{NoopTelemetry, TelemetryEvent, TelemetryPort};

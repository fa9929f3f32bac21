// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod cli;
pub mod fs;
pub mod process;
pub mod rsync;
pub mod ssh;
pub mod telemetry;
pub mod terminal;

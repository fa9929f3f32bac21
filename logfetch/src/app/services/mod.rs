// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod patterns;
pub mod remote_path;
pub mod shell;
pub mod version_sort;

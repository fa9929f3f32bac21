// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::ports::{TelemetryEvent, TelemetryPort};

#[derive(Clone, Default)]
pub struct TracingTelemetry;

impl TracingTelemetry {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetryPort for TracingTelemetry {
    fn event(&self, name: &'static str, fields: TelemetryEvent) {
        let TelemetryEvent {
            pipeline,
            project,
            session,
            job,
            remote_path,
            file_count,
        } = fields;

        tracing::debug!(
            target: "logfetch::telemetry",
            event = name,
            pipeline = pipeline.as_deref(),
            project = project.as_deref(),
            session = session.as_deref(),
            job = job.as_deref(),
            remote_path = remote_path.as_deref(),
            file_count = file_count,
        );
    }
}

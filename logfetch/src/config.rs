// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::app::services::remote_path;
use crate::app::types::{DEFAULT_JOB_MARKER, SiteConfig};

const APP_DIR_NAME: &str = "logfetch";
const CONFIG_FILE_NAME: &str = "logfetch.toml";
const CONFIG_ENV_VAR: &str = "LOGFETCH_CONFIG_PATH";
const HOST_ENV_VAR: &str = "LOGFETCH_HOST";
const BASE_PATH_ENV_VAR: &str = "LOGFETCH_BASE_PATH";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_BASE_PATH: &str = "/data/pipelines";
const DEFAULT_SSH_PROGRAM: &str = "ssh";
const DEFAULT_RSYNC_PROGRAM: &str = "rsync";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    base_path: Option<String>,
    job_marker: Option<String>,
    ssh_program: Option<String>,
    ssh_options: Option<Vec<String>>,
    rsync_program: Option<String>,
    verbose: Option<bool>,
}

#[derive(Debug)]
pub struct Config {
    pub host: String,
    pub base_path: String,
    pub job_marker: String,
    pub ssh_program: String,
    pub ssh_options: Vec<String>,
    pub rsync_program: String,
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
}

impl Config {
    pub fn site(&self) -> SiteConfig {
        SiteConfig {
            host: self.host.clone(),
            base_path: self.base_path.clone(),
            job_marker: self.job_marker.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Override,
    Env,
    ConfigFile,
    Default,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigSource::Override => "override",
            ConfigSource::Env => "env",
            ConfigSource::ConfigFile => "config",
            ConfigSource::Default => "default",
        }
    }
}

#[derive(Debug)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

#[derive(Debug)]
pub struct ConfigReport {
    pub config_path: Option<PathBuf>,
    pub config_path_source: Option<ConfigSource>,
    pub config_file_present: bool,
    pub host: ConfigValue<String>,
    pub base_path: ConfigValue<String>,
    pub job_marker: ConfigValue<String>,
    pub verbose: ConfigValue<bool>,
}

#[derive(Debug)]
pub struct LoadResult {
    pub config: Config,
    pub report: ConfigReport,
}

#[derive(Debug, Default)]
pub struct Overrides {
    pub verbose: Option<bool>,
}

pub fn load_with_report(
    config_path_override: Option<PathBuf>,
    overrides: Overrides,
) -> Result<LoadResult> {
    let (config_path, config_path_source, required) = match config_path_override {
        Some(path) => (Some(expand_path(path)), Some(ConfigSource::Override), true),
        None => match config_path_from_env()? {
            Some(path) => (Some(expand_path(path)), Some(ConfigSource::Env), true),
            None => match default_config_path().ok() {
                Some(path) => (Some(path), Some(ConfigSource::Default), false),
                None => (None, None, false),
            },
        },
    };
    let config_file_present = config_path
        .as_deref()
        .map(|path| path.exists())
        .unwrap_or(false);

    let file_config = match config_path.as_deref() {
        Some(path) => read_config_file(path, required)?,
        None => FileConfig::default(),
    };

    let (host, host_source) = match env_value(HOST_ENV_VAR)? {
        Some(host) => (host, ConfigSource::Env),
        None => match file_config.host {
            Some(host) => (host, ConfigSource::ConfigFile),
            None => (DEFAULT_HOST.to_string(), ConfigSource::Default),
        },
    };
    let host = host.trim().to_string();
    if host.is_empty() {
        anyhow::bail!("host must not be empty");
    }

    let (raw_base_path, base_path_source) = match env_value(BASE_PATH_ENV_VAR)? {
        Some(path) => (path, ConfigSource::Env),
        None => match file_config.base_path {
            Some(path) => (path, ConfigSource::ConfigFile),
            None => (DEFAULT_BASE_PATH.to_string(), ConfigSource::Default),
        },
    };
    let base_path = resolve_base_path(&raw_base_path)?;

    let (job_marker, job_marker_source) = match file_config.job_marker {
        Some(marker) => (marker, ConfigSource::ConfigFile),
        None => (DEFAULT_JOB_MARKER.to_string(), ConfigSource::Default),
    };
    if job_marker.is_empty() {
        anyhow::bail!("job_marker must not be empty");
    }

    let (verbose, verbose_source) = match overrides.verbose {
        Some(verbose) => (verbose, ConfigSource::Override),
        None => match file_config.verbose {
            Some(verbose) => (verbose, ConfigSource::ConfigFile),
            None => (false, ConfigSource::Default),
        },
    };

    let config = Config {
        host,
        base_path,
        job_marker,
        ssh_program: file_config
            .ssh_program
            .unwrap_or_else(|| DEFAULT_SSH_PROGRAM.to_string()),
        ssh_options: file_config.ssh_options.unwrap_or_default(),
        rsync_program: file_config
            .rsync_program
            .unwrap_or_else(|| DEFAULT_RSYNC_PROGRAM.to_string()),
        verbose,
        config_path: config_path.clone(),
    };

    let report = ConfigReport {
        config_path,
        config_path_source,
        config_file_present,
        host: ConfigValue {
            value: config.host.clone(),
            source: host_source,
        },
        base_path: ConfigValue {
            value: config.base_path.clone(),
            source: base_path_source,
        },
        job_marker: ConfigValue {
            value: config.job_marker.clone(),
            source: job_marker_source,
        },
        verbose: ConfigValue {
            value: config.verbose,
            source: verbose_source,
        },
    };

    Ok(LoadResult { config, report })
}

fn read_config_file(path: &Path, required: bool) -> Result<FileConfig> {
    if !path.exists() {
        if required {
            anyhow::bail!("config file not found at {}", path.display());
        }
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Expands `~` and normalizes; the result must be absolute.
fn resolve_base_path(raw: &str) -> Result<String> {
    let expanded = shellexpand::tilde(raw.trim());
    let normalized = remote_path::normalize_path(expanded.as_ref());
    if !normalized.is_absolute() {
        anyhow::bail!("base_path must be an absolute remote path, got '{raw}'");
    }
    Ok(normalized.to_string_lossy().into_owned())
}

fn expand_path(path: PathBuf) -> PathBuf {
    let path_string = path.to_string_lossy().to_string();
    let expanded = shellexpand::tilde(&path_string);
    PathBuf::from(expanded.as_ref())
}

fn env_value(key: &str) -> Result<Option<String>> {
    match std::env::var_os(key) {
        Some(value) => {
            if value.is_empty() {
                anyhow::bail!("{key} is set but empty");
            }
            value
                .into_string()
                .map(Some)
                .map_err(|_| anyhow::anyhow!("{key} is not valid UTF-8"))
        }
        None => Ok(None),
    }
}

fn config_path_from_env() -> Result<Option<PathBuf>> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) => {
            if value.is_empty() {
                anyhow::bail!("{CONFIG_ENV_VAR} is set but empty");
            }
            Ok(Some(PathBuf::from(value)))
        }
        None => Ok(None),
    }
}

fn default_config_path() -> Result<PathBuf> {
    Ok(default_config_dir()?.join(CONFIG_FILE_NAME))
}

fn default_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("failed to resolve config directory")?;
    Ok(base.join(APP_DIR_NAME))
}

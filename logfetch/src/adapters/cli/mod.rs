// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::app::errors::{AppError, AppResult, EXIT_CODE_FAILURE, EXIT_CODE_OK};
use crate::app::types::{DEFAULT_FILE_REGEXES, RunConfig};

#[derive(Parser, Debug)]
#[command(
    name = "logfetch",
    version,
    about = "Fetch log files of the latest pipeline job run from the cluster.",
    long_about = None,
    after_help = "Remote layout: <base_path>/<pipeline>/<project>/<job>_CHECK_DATA\n\
\n\
The pipeline directory is picked by a case-insensitive substring match and must be unique.\n\
The job directory is the version-latest one containing SESSION.\n\
Configuration precedence: defaults < config file < LOGFETCH_HOST/LOGFETCH_BASE_PATH < command-line flags.\n\
If --config is omitted, logfetch tries LOGFETCH_CONFIG_PATH, then the default config file location; missing default config is OK."
)]
pub struct Opts {
    #[arg(short = 'u', long, value_name = "USERNAME", help = "Cluster login name.")]
    pub username: Option<String>,
    #[arg(short = 'p', long, value_name = "PROJECT", help = "Project directory under the pipeline.")]
    pub project: Option<String>,
    #[arg(
        short = 'l',
        long = "pipeline",
        value_name = "PIPELINE_PATTERN",
        help = "Case-insensitive substring identifying exactly one pipeline directory."
    )]
    pub pipeline_pattern: Option<String>,
    #[arg(short = 's', long, value_name = "SESSION", help = "Session identifier contained in the job directory name.")]
    pub session: Option<String>,
    #[arg(
        short = 'r',
        long = "regex",
        value_name = "REGEX",
        action = clap::ArgAction::Append,
        help = "File path pattern to retrieve (repeatable). Defaults to 'stdout$' and 'stderr$'."
    )]
    pub regexes: Vec<String>,
    #[arg(
        short = 'd',
        long,
        value_name = "DESTINATION",
        default_value = ".",
        help = "Local directory receiving the files; created if missing."
    )]
    pub destination: PathBuf,
    #[arg(short = 'n', long, action = clap::ArgAction::SetTrue, help = "Show what would be transferred without copying.")]
    pub dry_run: bool,
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::SetTrue,
        help = "List matched files, make rsync verbose and enable debug logging. Overrides `verbose` from the config file."
    )]
    pub verbose: bool,
    #[arg(
        short = 'c',
        long,
        value_name = "PATH",
        help = "Path to a TOML config file. When omitted, logfetch uses LOGFETCH_CONFIG_PATH if set, otherwise the default config file location if available."
    )]
    pub config: Option<PathBuf>,
}

pub struct ParsedOpts {
    pub opts: Opts,
    pub verbose_override: Option<bool>,
}

const HELP_TEMPLATE: &str = r#"{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}

{after-help}
"#;

pub fn cli_command() -> clap::Command {
    Opts::command().help_template(HELP_TEMPLATE)
}

pub fn usage() -> String {
    cli_command().render_usage().to_string()
}

/// Parses `args`; help and version requests surface as `Err` with their clap kind.
pub fn try_parse_from<I, T>(args: I) -> Result<ParsedOpts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cli_command().try_get_matches_from(args)?;
    let verbose_override = if matches.get_flag("verbose") {
        Some(true)
    } else {
        None
    };
    let opts = Opts::from_arg_matches(&matches)?;
    Ok(ParsedOpts {
        opts,
        verbose_override,
    })
}

/// Parses the process arguments. Help and version exit 0, any other parse
/// failure prints the error with usage to stderr and exits 1.
pub fn parse_opts() -> ParsedOpts {
    match try_parse_from(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_CODE_OK,
                _ => EXIT_CODE_FAILURE,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

fn required(value: Option<String>, flag: &str, name: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(AppError::usage(format!("{name} ({flag}) must not be empty"))),
        None => Err(AppError::usage(format!("missing required option {flag} {name}"))),
    }
}

impl Opts {
    /// Validates required options and applies the default file patterns.
    /// `verbose` is the effective setting after config file and `-v` are merged.
    pub fn into_run_config(self, verbose: bool) -> AppResult<RunConfig> {
        let username = required(self.username, "-u", "USERNAME")?;
        let project = required(self.project, "-p", "PROJECT")?;
        let pipeline_pattern = required(self.pipeline_pattern, "-l", "PIPELINE_PATTERN")?;
        let session = required(self.session, "-s", "SESSION")?;
        let file_regexes = if self.regexes.is_empty() {
            DEFAULT_FILE_REGEXES.iter().map(|s| s.to_string()).collect()
        } else {
            self.regexes
        };
        Ok(RunConfig {
            username,
            project,
            pipeline_pattern,
            session,
            file_regexes,
            destination: self.destination,
            dry_run: self.dry_run,
            verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::errors::AppErrorKind;

    fn parse(args: &[&str]) -> ParsedOpts {
        let mut argv = vec!["logfetch"];
        argv.extend_from_slice(args);
        try_parse_from(argv).expect("arguments parse")
    }

    const REQUIRED: [&str; 8] = ["-u", "alice", "-p", "proj1", "-l", "analysis", "-s", "sess2024"];

    #[test]
    fn required_flags_build_run_config_with_defaults() {
        let parsed = parse(&REQUIRED);
        assert_eq!(parsed.verbose_override, None);
        let run = parsed.opts.into_run_config(false).unwrap();
        assert_eq!(run.username, "alice");
        assert_eq!(run.project, "proj1");
        assert_eq!(run.pipeline_pattern, "analysis");
        assert_eq!(run.session, "sess2024");
        assert_eq!(run.file_regexes, vec!["stdout$", "stderr$"]);
        assert_eq!(run.destination, PathBuf::from("."));
        assert!(!run.dry_run);
        assert!(!run.verbose);
    }

    #[test]
    fn regex_flag_is_repeatable_and_replaces_defaults() {
        let mut args = REQUIRED.to_vec();
        args.extend(["-r", "\\.log$", "-r", "^/scratch"]);
        let run = parse(&args).opts.into_run_config(false).unwrap();
        assert_eq!(run.file_regexes, vec!["\\.log$", "^/scratch"]);
    }

    #[test]
    fn modifiers_and_destination_are_parsed() {
        let mut args = REQUIRED.to_vec();
        args.extend(["-d", "/tmp/logs", "-n", "-v"]);
        let parsed = parse(&args);
        assert_eq!(parsed.verbose_override, Some(true));
        assert!(parsed.opts.verbose);
        let run = parsed.opts.into_run_config(true).unwrap();
        assert_eq!(run.destination, PathBuf::from("/tmp/logs"));
        assert!(run.dry_run);
        assert!(run.verbose);
    }

    #[test]
    fn long_flags_are_accepted() {
        let run = parse(&[
            "--username",
            "alice",
            "--project",
            "proj1",
            "--pipeline",
            "analysis",
            "--session",
            "sess2024",
            "--regex",
            "err$",
            "--dry-run",
        ])
        .opts
        .into_run_config(false)
        .unwrap();
        assert_eq!(run.file_regexes, vec!["err$"]);
        assert!(run.dry_run);
    }

    #[test]
    fn missing_required_flag_is_a_usage_error() {
        let err = parse(&["-u", "alice", "-p", "proj1", "-l", "analysis"])
            .opts
            .into_run_config(false)
            .unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::Usage);
        assert_eq!(err.exit_code(), 1);
        assert!(err.message().contains("-s"));
    }

    #[test]
    fn empty_required_value_is_a_usage_error() {
        let mut args = REQUIRED.to_vec();
        args[1] = " ";
        let err = parse(&args).opts.into_run_config(false).unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::Usage);
        assert!(err.message().contains("USERNAME"));
    }

    #[test]
    fn verbose_comes_from_the_merged_setting() {
        let parsed = parse(&REQUIRED);
        assert!(!parsed.opts.verbose);
        let run = parsed.opts.into_run_config(true).unwrap();
        assert!(run.verbose);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = try_parse_from(["logfetch", "-h"]).err().expect("help short-circuits");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = try_parse_from(["logfetch", "-x"]).err().expect("unknown flag");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn usage_mentions_binary_name() {
        assert!(usage().contains("logfetch"));
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::path::{Component, Path, PathBuf};

/// Joins remote path segments with `/`, ignoring empty segments and
/// redundant separators. The remote side is always POSIX.
pub fn join<S: AsRef<str>>(base: &str, segments: &[S]) -> String {
    let mut out = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.as_ref().trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() && base.starts_with('/') {
        out.push('/');
    }
    out
}

/// Prefix of the glob that covers every directory of one job run.
/// The trailing marker, optionally followed by one more character, is cut off;
/// a path without the marker is returned unchanged.
pub fn job_glob_prefix<'a>(job_path: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return job_path;
    }
    if let Some(prefix) = job_path.strip_suffix(marker) {
        return prefix;
    }
    if let Some((last, _)) = job_path.char_indices().next_back() {
        if let Some(prefix) = job_path[..last].strip_suffix(marker) {
            return prefix;
        }
    }
    job_path
}

/// Normalize a path syntactically
/// - remove `.`
/// - resolve .. where possible
/// - keeps an absolute root if present
pub fn normalize_path(p: impl AsRef<Path>) -> PathBuf {
    let mut out = PathBuf::new();
    let mut comps = p.as_ref().components().peekable();
    if let Some(Component::RootDir) = comps.peek() {
        out.push(Path::new(std::path::MAIN_SEPARATOR_STR));
        comps.next();
    }

    for comp in comps {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out.pop();
                if !popped || out.as_os_str().is_empty() {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
            Component::Prefix(_) | Component::RootDir => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_builds_project_path() {
        assert_eq!(
            join("/data/pipelines/", &["Analysis_Pipeline_v2", "proj1"]),
            "/data/pipelines/Analysis_Pipeline_v2/proj1"
        );
    }

    #[test]
    fn join_skips_empty_segments() {
        assert_eq!(join("/data", &["", "/p/", "x"]), "/data/p/x");
        assert_eq!(join("/", &["p"]), "/p");
        assert_eq!(join("/", &[] as &[&str]), "/");
    }

    #[test]
    fn glob_replaces_marker() {
        assert_eq!(
            job_glob_prefix("/data/p/proj1/run_10_CHECK_DATA", "_CHECK_DATA"),
            "/data/p/proj1/run_10"
        );
    }

    #[test]
    fn glob_replaces_marker_with_one_trailing_character() {
        assert_eq!(
            job_glob_prefix("/data/p/proj1/run_10_CHECK_DATA/", "_CHECK_DATA"),
            "/data/p/proj1/run_10"
        );
    }

    #[test]
    fn glob_leaves_two_trailing_characters_alone() {
        assert_eq!(
            job_glob_prefix("/data/p/run_10_CHECK_DATAxy", "_CHECK_DATA"),
            "/data/p/run_10_CHECK_DATAxy"
        );
    }

    #[test]
    fn glob_prefix_without_marker_is_the_job_path() {
        assert_eq!(job_glob_prefix("/data/p/run_10", "_CHECK_DATA"), "/data/p/run_10");
    }

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(
            normalize_path("/data/./pipelines/../runs/"),
            PathBuf::from("/data/runs")
        );
        assert_eq!(normalize_path("../x"), PathBuf::from("../x"));
    }
}

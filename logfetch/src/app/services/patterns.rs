// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use regex::Regex;

use crate::app::errors::{AppError, AppResult};

/// Joins fragments into a single alternation group: `(a|b|c)`.
/// Fragments are not validated here.
pub fn aggregate<S: AsRef<str>>(fragments: &[S]) -> String {
    let joined = fragments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("|");
    format!("({joined})")
}

pub fn compile(pattern: &str) -> AppResult<Regex> {
    Regex::new(pattern)
        .map_err(|err| AppError::invalid_pattern(format!("invalid file pattern {pattern}: {err}")))
}

/// Keeps the lines matching `regex` anywhere, in their original order.
pub fn filter_lines<I, S>(lines: I, regex: &Regex) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| regex.is_match(line.as_ref()))
        .map(|line| line.as_ref().to_string())
        .collect()
}

/// Case-insensitive substring test used to pick pipeline directories.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::errors::AppErrorKind;
    use crate::app::types::DEFAULT_FILE_REGEXES;

    #[test]
    fn aggregates_default_fragments() {
        assert_eq!(aggregate(&DEFAULT_FILE_REGEXES), "(stdout$|stderr$)");
    }

    #[test]
    fn aggregates_single_fragment() {
        assert_eq!(aggregate(&["\\.log$"]), "(\\.log$)");
    }

    #[test]
    fn default_pattern_is_anchored_at_the_end() {
        let regex = compile(&aggregate(&DEFAULT_FILE_REGEXES)).unwrap();
        assert!(regex.is_match("/data/p/proj1/run_1/job.stdout"));
        assert!(regex.is_match("/data/p/proj1/run_1/stderr"));
        assert!(!regex.is_match("/data/p/proj1/run_1/job.stdoutx"));
        assert!(!regex.is_match("/data/p/proj1/run_1/stdout.log"));
    }

    #[test]
    fn malformed_fragment_is_reported_at_compile_time() {
        let pattern = aggregate(&["stdout$", "std(err"]);
        let err = compile(&pattern).unwrap_err();
        assert_eq!(err.kind(), AppErrorKind::InvalidPattern);
        assert!(err.message().contains("std(err"));
    }

    #[test]
    fn filter_preserves_listing_order() {
        let regex = compile("(b|a)").unwrap();
        let kept = filter_lines(["c", "b", "x", "a"], &regex);
        assert_eq!(kept, vec!["b", "a"]);
    }

    #[test]
    fn substring_match_ignores_case() {
        assert!(contains_ignore_case("Analysis_Pipeline_v2", "analysis"));
        assert!(contains_ignore_case("rnaseq", "RNA"));
        assert!(!contains_ignore_case("rnaseq", "dna"));
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use std::cmp::Ordering;

/// Compares names the way `sort -V` orders them: runs of digits compare by
/// numeric value, everything else byte by byte.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a.as_bytes(), b.as_bytes());
    loop {
        match (a.first(), b.first()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (num_a, rest_a) = split_digits(a);
                let (num_b, rest_b) = split_digits(b);
                match compare_numeric(num_a, num_b) {
                    Ordering::Equal => {}
                    other => return other,
                }
                a = rest_a;
                b = rest_b;
            }
            (Some(x), Some(y)) => {
                match x.cmp(y) {
                    Ordering::Equal => {}
                    other => return other,
                }
                a = &a[1..];
                b = &b[1..];
            }
        }
    }
}

/// Sorts ascending in version order. Equal keys keep their input order.
pub fn sort(names: &mut [String]) {
    names.sort_by(|a, b| compare(a, b));
}

fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let a_trimmed = trim_leading_zeros(a);
    let b_trimmed = trim_leading_zeros(b);
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        // "01" sorts before "1" so the order stays total.
        .then_with(|| b.len().cmp(&a.len()))
}

fn trim_leading_zeros(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|c| *c != b'0').unwrap_or(s.len());
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(input: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        sort(&mut names);
        names
    }

    #[test]
    fn numeric_runs_compare_by_value() {
        assert_eq!(
            sorted(&["run_1_CHECK_DATA", "run_10_CHECK_DATA", "run_2_CHECK_DATA"]),
            vec!["run_1_CHECK_DATA", "run_2_CHECK_DATA", "run_10_CHECK_DATA"]
        );
    }

    #[test]
    fn timestamps_sort_chronologically() {
        assert_eq!(
            sorted(&[
                "sess_20240103_0930_CHECK_DATA",
                "sess_20231231_2359_CHECK_DATA",
                "sess_20240103_0901_CHECK_DATA",
            ]),
            vec![
                "sess_20231231_2359_CHECK_DATA",
                "sess_20240103_0901_CHECK_DATA",
                "sess_20240103_0930_CHECK_DATA",
            ]
        );
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare("run", "run_1"), Ordering::Less);
        assert_eq!(compare("run_1", "run"), Ordering::Greater);
        assert_eq!(compare("run_1", "run_1"), Ordering::Equal);
    }

    #[test]
    fn leading_zeros_do_not_change_magnitude() {
        assert_eq!(compare("v007", "v10"), Ordering::Less);
        assert_eq!(compare("v01", "v1"), Ordering::Less);
    }

    #[test]
    fn non_digits_compare_bytewise() {
        assert_eq!(compare("a2", "b1"), Ordering::Less);
        assert_eq!(compare("B", "a"), Ordering::Less);
    }
}

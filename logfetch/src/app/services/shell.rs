// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::types::{RemoteArg, RemoteCommand};

/// Very small, safe-ish shell escaper for paths.
pub fn sh_escape(p: &str) -> String {
    let mut out = String::from("'");
    out.push_str(&p.replace('\'', r"'\''"));
    out.push('\'');
    out
}

/// Renders a command line for the remote POSIX shell.
/// Every word is quoted; a glob argument leaves only its trailing `*` bare.
pub fn render(command: &RemoteCommand) -> String {
    let mut out = sh_escape(&command.program);
    for arg in &command.args {
        out.push(' ');
        match arg {
            RemoteArg::Literal(value) => out.push_str(&sh_escape(value)),
            RemoteArg::Glob(prefix) => {
                out.push_str(&sh_escape(prefix));
                out.push('*');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_single_quotes() {
        assert_eq!(sh_escape("it's"), r"'it'\''s'");
    }

    #[test]
    fn quotes_metacharacters() {
        assert_eq!(sh_escape("a; rm -rf ~"), "'a; rm -rf ~'");
    }

    #[test]
    fn renders_literals_and_globs() {
        let command = RemoteCommand::new("find")
            .glob("/data/Analysis Pipeline/proj1/run_10")
            .arg("-type")
            .arg("f");
        assert_eq!(
            render(&command),
            "'find' '/data/Analysis Pipeline/proj1/run_10'* '-type' 'f'"
        );
    }
}

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::ResolutionConfig;
use crate::error::DispatchError;
use crate::resolve::{CommandTable, Resolver};

/// What the harness should do with this invocation.
#[derive(Debug)]
pub enum Outcome {
    /// No arguments at all: usage on stderr, exit 1.
    ShowUsageAndFail,
    /// `--help` or `-h` with no subcommand: usage on stdout, exit 0.
    ShowUsageAndSucceed,
    Error(DispatchError),
    /// Replace the process with `path`, passing `args` after `argv[0]`.
    Exec { path: PathBuf, args: Vec<OsString> },
}

/// Subcommand tokens taken from the front of an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Accepted name components, in order.
    pub components: Vec<String>,
    /// The input with exactly the accepted tokens removed.
    pub forwarded: Vec<OsString>,
}

/// Pick up to `max_depth` subcommand components from `args` (argv without
/// the program name).
///
/// Tokens starting with `-` are skipped and stay in place. Scanning stops at
/// `--`; that token and everything after it are forwarded untouched.
pub fn extract_subcommand(args: &[OsString], max_depth: usize) -> Extraction {
    let mut components = Vec::new();
    let mut consumed = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        if components.len() >= max_depth {
            break;
        }
        if arg == "--" {
            break;
        }
        let token = arg.to_string_lossy();
        if token.starts_with('-') {
            continue;
        }
        components.push(token.into_owned());
        consumed.push(i);
    }

    let forwarded = args
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, arg)| arg.clone())
        .collect();

    Extraction {
        components,
        forwarded,
    }
}

/// Basename of `argv[0]`; the namespace root for subcommand lookup.
pub fn program_name(argv0: &OsStr) -> String {
    Path::new(argv0)
        .file_name()
        .unwrap_or(argv0)
        .to_string_lossy()
        .into_owned()
}

/// Turns an argument vector into an [`Outcome`] for one prefix.
pub struct Dispatcher<'a> {
    program: &'a str,
    config: &'a ResolutionConfig,
    search_path: &'a [PathBuf],
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        program: &'a str,
        config: &'a ResolutionConfig,
        search_path: &'a [PathBuf],
    ) -> Self {
        Self {
            program,
            config,
            search_path,
        }
    }

    pub fn program(&self) -> &str {
        self.program
    }

    /// Discover this program's subcommands.
    pub fn commands(&self) -> CommandTable {
        Resolver::new(self.config).resolve(self.program, self.search_path)
    }

    /// Decide what to do with `argv` (including the program name at index 0).
    pub fn dispatch(&self, argv: &[OsString]) -> Outcome {
        let args = match argv.split_first() {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => return Outcome::ShowUsageAndFail,
        };

        let Extraction {
            components,
            forwarded,
        } = extract_subcommand(args, self.config.max_depth);

        if components.is_empty() {
            let first = args[0].as_os_str();
            return if first == "--help" || first == "-h" {
                Outcome::ShowUsageAndSucceed
            } else {
                Outcome::Error(DispatchError::FlagNotFound)
            };
        }

        let key = components.join(self.config.separator.as_str());
        let table = self.commands();
        match table.get(&key) {
            Some(candidate) => {
                tracing::debug!(
                    key = %key,
                    path = %candidate.path.display(),
                    forwarded = forwarded.len(),
                    "resolved subcommand"
                );
                Outcome::Exec {
                    path: candidate.path.clone(),
                    args: forwarded,
                }
            }
            None => {
                tracing::debug!(key = %key, known = table.len(), "no matching subcommand");
                Outcome::Error(DispatchError::CommandNotFound {
                    name: components.join(" "),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn flags_before_subcommand_are_kept() {
        let got = extract_subcommand(&os(&["-v", "bar", "x", "y"]), 1);
        assert_eq!(got.components, vec!["bar"]);
        assert_eq!(got.forwarded, os(&["-v", "x", "y"]));
    }

    #[test]
    fn double_dash_ends_scan() {
        let got = extract_subcommand(&os(&["--", "bar"]), 1);
        assert!(got.components.is_empty());
        assert_eq!(got.forwarded, os(&["--", "bar"]));
    }

    #[test]
    fn depth_limits_consumed_tokens() {
        let got = extract_subcommand(&os(&["remote", "-q", "add", "origin"]), 2);
        assert_eq!(got.components, vec!["remote", "add"]);
        assert_eq!(got.forwarded, os(&["-q", "origin"]));

        let got = extract_subcommand(&os(&["remote", "add", "origin"]), 1);
        assert_eq!(got.components, vec!["remote"]);
        assert_eq!(got.forwarded, os(&["add", "origin"]));
    }

    #[test]
    fn scan_stops_at_double_dash_after_partial_name() {
        let got = extract_subcommand(&os(&["remote", "--", "add"]), 2);
        assert_eq!(got.components, vec!["remote"]);
        assert_eq!(got.forwarded, os(&["--", "add"]));
    }

    #[test]
    fn program_name_is_basename() {
        assert_eq!(program_name(OsStr::new("/usr/local/bin/git")), "git");
        assert_eq!(program_name(OsStr::new("git")), "git");
    }
}

pub mod blurb;

use std::collections::btree_map::{self, BTreeMap};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::config::ResolutionConfig;
use crate::name::Name;

pub use blurb::{HelpBlurbProbe, Introspect, BLURB_FLAG};

/// An executable on the search path that implements a direct subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Encoded subcommand name, e.g. `remote_add`.
    pub key: String,
    /// One-line description; empty until probed or when the probe fails.
    pub blurb: String,
}

/// Subcommands discovered for one prefix, keyed by encoded name.
///
/// Iteration is ordered by key.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: BTreeMap<String, Candidate>,
}

impl CommandTable {
    pub fn get(&self, key: &str) -> Option<&Candidate> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.values()
    }

    /// Insert unless the key is taken. Returns whether the candidate was kept.
    fn insert_first(&mut self, candidate: Candidate) -> bool {
        match self.entries.entry(candidate.key.clone()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(candidate);
                true
            }
            btree_map::Entry::Occupied(existing) => {
                tracing::debug!(
                    key = %candidate.key,
                    kept = %existing.get().path.display(),
                    shadowed = %candidate.path.display(),
                    "duplicate subcommand later on search path"
                );
                false
            }
        }
    }

    /// Fill in every candidate's blurb, one probe at a time.
    pub async fn fetch_blurbs(&mut self, probe: &dyn Introspect) {
        for candidate in self.entries.values_mut() {
            candidate.blurb = probe.blurb(&candidate.path).await;
        }
    }
}

/// Maps a prefix to the executables that implement its subcommands.
pub struct Resolver<'a> {
    config: &'a ResolutionConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ResolutionConfig) -> Self {
        Self { config }
    }

    /// Scan `search_path` in order and collect direct subcommands of `prefix`.
    ///
    /// Directories that cannot be listed contribute nothing. The first
    /// candidate seen for a key wins.
    pub fn resolve(&self, prefix: &str, search_path: &[PathBuf]) -> CommandTable {
        let sep = self.config.separator.as_str();
        let header = format!("{}{}", Name::new(prefix).encode(sep), sep);
        let mut table = CommandTable::default();

        let matcher = match header_matcher(&header) {
            Some(m) => m,
            None => return table,
        };

        for dir in search_path {
            for path in self.scan_dir(dir, &matcher) {
                let Some(base) = path.file_name().and_then(OsStr::to_str) else {
                    continue;
                };
                let Some(rest) = base.strip_prefix(header.as_str()) else {
                    continue;
                };

                let depth = Name::new(rest).parts(sep).len();
                if depth > self.config.max_depth {
                    tracing::debug!(
                        path = %path.display(),
                        depth,
                        max_depth = self.config.max_depth,
                        "skipping nested subcommand"
                    );
                    continue;
                }

                table.insert_first(Candidate {
                    key: rest.to_string(),
                    path,
                    blurb: String::new(),
                });
            }
        }

        table
    }

    /// Executables in `dir` whose basename matches the header glob, sorted by
    /// name. Listing failures yield an empty list.
    fn scan_dir(&self, dir: &Path, matcher: &GlobMatcher) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping search path entry");
                return Vec::new();
            }
        };

        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| matcher.is_match(entry.file_name()))
            .map(|entry| entry.path())
            .filter(|path| is_executable(path))
            .collect();
        matches.sort();
        matches
    }
}

/// The directories listed in `PATH`, in order. An empty entry is the current
/// directory.
pub fn search_path_from_env() -> Vec<PathBuf> {
    match std::env::var_os("PATH") {
        Some(raw) => split_search_path(&raw),
        None => Vec::new(),
    }
}

pub fn split_search_path(raw: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(raw)
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                dir
            }
        })
        .collect()
}

/// Glob for `<header>*`, with the header matched literally.
fn header_matcher(header: &str) -> Option<GlobMatcher> {
    let pattern = format!("{}*", escape_glob(header));
    match GlobBuilder::new(&pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            tracing::debug!(pattern = %pattern, error = %e, "unusable subcommand glob");
            None
        }
    }
}

fn escape_glob(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '\\' | ',' | '!') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

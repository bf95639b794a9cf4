use std::time::Duration;

use clap::Parser;

use crate::error::{DispatchError, Result};

pub const DEFAULT_SEPARATOR: &str = "_";
pub const DEFAULT_MAX_DEPTH: usize = 1;
pub const DEFAULT_BLURB_TIMEOUT_MS: u64 = 2000;

pub const SEPARATOR_VAR: &str = "META_SEP";
pub const MAX_DEPTH_VAR: &str = "META_SUBCMD_MAX";
pub const BLURB_TIMEOUT_VAR: &str = "META_BLURB_TIMEOUT_MS";

/// Settings shared by the resolver and the dispatcher.
///
/// Built once at startup and only ever borrowed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Joins the components of an encoded name (`remote_add`).
    pub separator: String,
    /// Number of name components a direct subcommand may have.
    pub max_depth: usize,
    /// Upper bound on a single `--help-blurb` probe.
    pub blurb_timeout: Duration,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            blurb_timeout: Duration::from_millis(DEFAULT_BLURB_TIMEOUT_MS),
        }
    }
}

/// Typed view of the environment settings.
///
/// Never parsed from the real command line: `from_lookup` synthesizes an
/// argument vector from the environment so clap only does the type checking.
#[derive(Debug, Parser)]
#[command(name = "meta", disable_help_flag = true, disable_version_flag = true)]
struct EnvSettings {
    #[arg(long, value_name = SEPARATOR_VAR, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    #[arg(long, value_name = MAX_DEPTH_VAR, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[arg(long, value_name = BLURB_TIMEOUT_VAR, default_value_t = DEFAULT_BLURB_TIMEOUT_MS)]
    blurb_timeout_ms: u64,
}

impl ResolutionConfig {
    pub fn new(separator: impl Into<String>, max_depth: usize) -> Self {
        Self {
            separator: separator.into(),
            max_depth,
            ..Self::default()
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// Unset values take the default. A value that does not parse as its type
    /// is a `Config` error. An empty value or a zero depth is invalid and is
    /// replaced by the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut args = vec!["meta".to_string()];
        for (var, flag) in [
            (SEPARATOR_VAR, "--separator"),
            (MAX_DEPTH_VAR, "--max-depth"),
            (BLURB_TIMEOUT_VAR, "--blurb-timeout-ms"),
        ] {
            match lookup(var) {
                Some(value) if value.is_empty() => {
                    tracing::warn!(var, "empty value, using default");
                }
                Some(value) => args.push(format!("{}={}", flag, value)),
                None => {}
            }
        }

        let settings = EnvSettings::try_parse_from(args).map_err(|e| DispatchError::Config {
            reason: first_line(&e.to_string()),
        })?;

        let max_depth = if settings.max_depth == 0 {
            tracing::warn!(var = MAX_DEPTH_VAR, "depth must be at least 1, using default");
            DEFAULT_MAX_DEPTH
        } else {
            settings.max_depth
        };

        Ok(Self {
            separator: settings.separator,
            max_depth,
            blurb_timeout: Duration::from_millis(settings.blurb_timeout_ms),
        })
    }
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default();
    line.trim_start_matches("error: ").to_string()
}

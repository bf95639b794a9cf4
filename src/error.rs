use std::path::PathBuf;

/// Terminal failures of a dispatch run.
///
/// Every variant is reported as a single `<program>: <message>` line and ends the
/// process with status 1. Unreadable search-path directories and failed blurb
/// probes are not represented here; the resolver absorbs them.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("missing command")]
    MissingCommand,

    #[error("flag not found")]
    FlagNotFound,

    #[error("command not found: {name}")]
    CommandNotFound { name: String },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("failed to execute {}: {source}", path.display())]
    Exec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DispatchError>;

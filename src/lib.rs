pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod name;
pub mod resolve;
pub mod usage;

pub use config::ResolutionConfig;
pub use dispatch::{extract_subcommand, Dispatcher, Extraction, Outcome};
pub use error::{DispatchError, Result};
pub use name::Name;
pub use resolve::{Candidate, CommandTable, HelpBlurbProbe, Introspect, Resolver};

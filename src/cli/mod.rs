pub mod exec;

use std::ffi::OsString;

use crate::config::ResolutionConfig;
use crate::dispatch::{program_name, Dispatcher, Outcome};
use crate::error::DispatchError;
use crate::resolve::{search_path_from_env, HelpBlurbProbe};
use crate::usage;

const FALLBACK_PROGRAM: &str = "meta";

/// Run one invocation and return the exit status.
///
/// Does not return on a successful exec.
pub async fn run(argv: Vec<OsString>) -> i32 {
    let program = argv
        .first()
        .map(|argv0| program_name(argv0))
        .unwrap_or_else(|| FALLBACK_PROGRAM.to_string());

    let config = match ResolutionConfig::from_env() {
        Ok(config) => config,
        Err(e) => return report(&program, &e),
    };
    tracing::debug!(
        separator = %config.separator,
        max_depth = config.max_depth,
        "loaded configuration"
    );

    let search_path = search_path_from_env();
    let dispatcher = Dispatcher::new(&program, &config, &search_path);

    match dispatcher.dispatch(&argv) {
        Outcome::ShowUsageAndFail => {
            eprintln!("{}", render_usage(&dispatcher, &config).await);
            report(&program, &DispatchError::MissingCommand)
        }
        Outcome::ShowUsageAndSucceed => {
            println!("{}", render_usage(&dispatcher, &config).await);
            0
        }
        Outcome::Error(e) => report(&program, &e),
        Outcome::Exec { path, args } => {
            tracing::info!(path = %path.display(), "handing off to subcommand");
            let e = exec::replace_process(&path, &args);
            report(&program, &e)
        }
    }
}

async fn render_usage(dispatcher: &Dispatcher<'_>, config: &ResolutionConfig) -> String {
    let mut commands = dispatcher.commands();
    commands
        .fetch_blurbs(&HelpBlurbProbe::new(config.blurb_timeout))
        .await;
    usage::render(dispatcher.program(), &commands, &config.separator)
}

fn report(program: &str, error: &DispatchError) -> i32 {
    eprintln!("{}: {}", program, error);
    1
}

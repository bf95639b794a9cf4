use anyhow::Context;

fn main() -> anyhow::Result<()> {
    meta_dispatch::logging::init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let code = runtime.block_on(meta_dispatch::cli::run(std::env::args_os().collect()));
    std::process::exit(code);
}

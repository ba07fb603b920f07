//! # Dashboard CLI
//!
//! Drives the dashboard model from the command line: replays a JSON script
//! of commands against a stored model and prints the result as JSON.
//!
//! Set `RUST_LOG=dash_core=debug` to see every command the core executes.

mod cli;

use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    cli::run_from_env()
}

//! CLI entry point for plenary extraction.

use plenaries::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so `references` output can be piped; WARN unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

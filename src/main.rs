//! ManeTracker main entrypoint.

use manetracker::run;
use manetracker::ui::messages::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Persistence warnings are already shown by the command handlers;
    // RUST_LOG=manetracker=debug shows the library diagnostics as well.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}

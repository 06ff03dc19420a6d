//! Log setup for the command line tool.
//!
//! Logs go to stderr so they never interleave with diagnostics on stdout.
//! `RUST_LOG` takes precedence over the `-v` count.

use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map the number of `-v` flags to a default level.
fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

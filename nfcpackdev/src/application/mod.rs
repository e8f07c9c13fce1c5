pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use nfcpack_core::error::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG always wins; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Check { inputs, json } => handlers::handle_check(inputs, json),
        Commands::Pack {
            dir,
            out,
            level,
            per_file,
            dest,
            on_collision,
        } => handlers::handle_pack(dir, out, level, per_file, dest, on_collision.policy()),
        Commands::Export {
            inputs,
            dest,
            on_collision,
        } => handlers::handle_export(inputs, dest, on_collision.policy()),
    }
}

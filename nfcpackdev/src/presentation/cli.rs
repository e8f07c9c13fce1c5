use clap::{Parser, Subcommand, ValueEnum};
use nfcpack_core::policy::CollisionPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "nfcpackdev CLI (alpha)", long_about = None)]
pub struct Cli {
    /// Log at debug level (RUST_LOG in the environment takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CollisionArg {
    /// Disambiguate with " (n)" before the extension
    Suffix,
    /// Refuse the export on the first collision
    Error,
}

impl CollisionArg {
    pub fn policy(self) -> CollisionPolicy {
        match self {
            CollisionArg::Suffix => CollisionPolicy::Suffix,
            CollisionArg::Error => CollisionPolicy::Error,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the original -> normalized mapping without writing anything
    Check {
        /// One folder, or any number of individual files
        inputs: Vec<PathBuf>,

        /// Emit the mapping as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Repack a folder into a ZIP whose internal paths are NFC-composed
    Pack {
        dir: PathBuf,

        /// Output path; defaults to "<normalized folder name>.zip"
        /// beside the input
        #[arg(long)]
        out: Option<PathBuf>,

        /// Deflate level; 0 stores entries uncompressed
        #[arg(long, default_value_t = 6)]
        level: i64,

        /// Write independent renamed files instead of an archive
        #[arg(long)]
        per_file: bool,

        /// Destination directory for --per-file output
        #[arg(long)]
        dest: Option<PathBuf>,

        #[arg(long = "on-collision", value_enum, default_value = "suffix")]
        on_collision: CollisionArg,
    },

    /// Copy files into a directory under their NFC-composed names
    Export {
        inputs: Vec<PathBuf>,

        #[arg(long)]
        dest: PathBuf,

        #[arg(long = "on-collision", value_enum, default_value = "suffix")]
        on_collision: CollisionArg,
    },
}

//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to the packing
//! runner.

mod pack;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::PackMode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Atlaspack - pack folders of sprite PNGs into grid spritesheets
#[derive(Parser)]
#[command(name = "atlaspack")]
#[command(about = "Atlaspack - pack folders of sprite PNGs into grid spritesheets with a JSON manifest")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub args: PackArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack every folder into one atlas (one row per folder)
    Batch {
        #[command(flatten)]
        args: PackArgs,
    },
    /// Pack each folder into its own atlas
    Folders {
        #[command(flatten)]
        args: PackArgs,
    },
}

/// Options shared by every packing mode
#[derive(Args, Debug, Clone, Default)]
pub struct PackArgs {
    /// Assets root whose subdirectories hold sprites (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output directory, relative to the root (default: the root)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// File name suffix identifying sprites (default: .png)
    #[arg(long)]
    pub extension: Option<String>,

    /// Manifest file name (default: data.json)
    #[arg(long)]
    pub manifest: Option<String>,

    /// Batch atlas file name (default: atlas.png)
    #[arg(long)]
    pub atlas_name: Option<String>,

    /// Abort on the first undecodable sprite (default)
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Skip folders with undecodable sprites instead of aborting
    #[arg(long)]
    pub lenient: bool,

    /// Also pack dot-directories, which are skipped by default
    /// (pass this to process every subdirectory of the root)
    #[arg(long)]
    pub include_hidden: bool,

    /// Indent the JSON manifest
    #[arg(long)]
    pub pretty: bool,

    /// Show what would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to atlaspack.toml (default: searched upward from the root)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PackArgs {
    fn strictness(&self) -> Option<bool> {
        if self.lenient {
            Some(false)
        } else if self.strict {
            Some(true)
        } else {
            None
        }
    }
}

/// Parse arguments, set up logging and run the requested command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let (mode, args) = match cli.command {
        Some(Commands::Batch { args }) => (Some(PackMode::Batch), args),
        Some(Commands::Folders { args }) => (Some(PackMode::Folders), args),
        None => (None, cli.args),
    };

    init_logging(args.verbose);
    pack::run_pack(mode, &args)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).format_timestamp(None).try_init();
}

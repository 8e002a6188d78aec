//! Pack command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{PackArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::loader::{load_config, merge_cli_overrides, CliOverrides};
use crate::config::PackMode;
use crate::pack::{pack, PackOptions};

/// Run a packing pass. `mode` is `None` when no subcommand was given.
pub fn run_pack(mode: Option<PackMode>, args: &PackArgs) -> ExitCode {
    let root = match args.root {
        Some(ref root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    if !root.is_dir() {
        eprintln!("Error: Assets root not found: {}", root.display());
        eprintln!("Run from inside the assets directory or pass --root");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut config = match load_config(args.config.as_deref(), &root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let overrides = CliOverrides {
        mode,
        out: args.out.clone(),
        extension: args.extension.clone(),
        manifest: args.manifest.clone(),
        atlas_name: args.atlas_name.clone(),
        strict: args.strictness(),
        include_hidden: args.include_hidden.then_some(true),
        pretty: args.pretty.then_some(true),
    };
    merge_cli_overrides(&mut config, &overrides);

    // File values and CLI values are validated together, after merging
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("Error: {}", error);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let options = PackOptions::from_config(&root, &config).with_dry_run(args.dry_run);
    let mode = config.pack.mode;

    if args.dry_run {
        println!("Dry run - would pack ({:?} mode):", mode);
        println!("  Root:   {}", root.display());
        println!("  Output: {}", options.out_dir.display());
    }

    match pack(mode, &options) {
        Ok(report) => {
            if args.dry_run {
                for atlas in &report.atlases {
                    println!("    - {}", display_relative(atlas, &root));
                }
                println!("    - {}", display_relative(&report.manifest_path, &root));
            }
            for skipped in &report.skipped {
                eprintln!("Skipped {}: {}", skipped.name, skipped.reason);
            }
            println!("{}", report.summary());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

//! Atlaspack - Command-line tool for packing sprite folders into spritesheets

use std::process::ExitCode;

use atlaspack::cli;

fn main() -> ExitCode {
    cli::run()
}

//! The `slog-filt` binary.

use anyhow::Context;
use clap::Parser;

use slogfilt::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let options = cli.into_options();
    let input = options.input.display().to_string();

    slogfilt::run(&options).with_context(|| format!("failed to filter {}", input))?;
    Ok(())
}

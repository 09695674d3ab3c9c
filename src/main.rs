//! tracelog CLI entry point.

use std::io;

use anyhow::Result;
use clap::Parser;

use tracelog::cli::{execute, Cli};
use tracelog::infrastructure::logging::init_diagnostics;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_diagnostics(cli.diagnostics)?;

    execute(&cli, io::stdin().lock())?;
    Ok(())
}

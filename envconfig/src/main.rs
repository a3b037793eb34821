mod cli;
mod commands;
mod observability;

use std::io;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init_tracing(cli.log_json);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &mut out)
}

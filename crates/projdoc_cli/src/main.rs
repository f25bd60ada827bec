//! `projdoc` entry point.

mod cli;
mod commands;

use clap::Parser;
use log::error;

use cli::Cli;
use commands::Workspace;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("event=command module=cli status=error error={e}");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::Result<()> {
    let workspace = Workspace::new(commands::absolute(&cli.data_dir())?);
    projdoc_core::init_logging(cli.log_level(), &workspace.log_dir())?;
    commands::execute(cli.command, &workspace, cli.format)
}

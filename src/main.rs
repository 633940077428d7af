use anyhow::Result;
use cfglint::cli::{Cli, Commands};
use cfglint::commands;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            log_calls,
        } => commands::analyze_command(path, format, output, config, log_calls),
        Commands::Dump { path, output } => commands::dump_command(path, output),
    }
}

mod agents;
mod cli;
mod error;
mod grouping;
mod utils;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var("MAJOR_GROUPS_VERBOSE", "1");
        }
    }

    let result = match cli.command {
        Commands::Group {
            inputs,
            output,
            dry_run,
        } => workflow::execute_group(&cli.path, &inputs, &output, dry_run).map(|_| ()),
        Commands::Sections { report } => workflow::execute_sections(&cli.path, &report),
        Commands::Prepare {
            inputs,
            skip_npm_check,
        } => workflow::execute_prepare(&cli.path, &inputs, skip_npm_check),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

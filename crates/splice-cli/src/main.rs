//! splice CLI
//!
//! Anchor-based block insertion and replacement, and JSON key relocation.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} anchor-based file splicing", "splice".green().bold());
            println!();
            println!("Run {} for available commands.", "splice --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Insert {
            file,
            anchor,
            fragment,
            dry_run,
        } => commands::run_insert(&cwd, file, anchor, fragment, dry_run),
        Commands::Replace {
            file,
            anchor,
            close,
            balance_with,
            fragment,
            dry_run,
        } => commands::run_replace(&cwd, file, anchor, close, balance_with, fragment, dry_run),
        Commands::Relocate {
            files,
            moves,
            group,
            dry_run,
        } => commands::run_relocate(&cwd, files, moves, group, dry_run),
        Commands::Apply {
            recipe,
            root,
            dry_run,
            json,
        } => commands::run_apply(&cwd, &recipe, root.as_deref(), dry_run, json),
    }
}

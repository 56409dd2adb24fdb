//! Main entry point for the rig-rs CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Set verbosity
    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    match cli.command {
        Commands::Info { assets } => commands::info::execute(&assets),
        Commands::Validate { assets } => commands::validate::execute(&assets),
        Commands::Eval {
            assets,
            time,
            blend_roots,
            json,
        } => commands::eval::execute(&assets, time, blend_roots, json),
        Commands::Export {
            assets,
            time,
            truncate,
            json,
        } => commands::export::execute(&assets, time, truncate, json),
        Commands::Bind { assets } => commands::bind::execute(&assets),
    }
}

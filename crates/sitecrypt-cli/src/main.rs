//! sitecrypt CLI - seal a static site's private data behind a password
//!
//! Thin command-line layer over `sitecrypt-core`: resolves the password and
//! file locations, drives the pipeline, and maps failures to exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod ui;

use clap::Parser;
use sitecrypt_core::SiteCryptError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{build, decrypt, misc, verify};
use crate::constants::exit_codes;
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = AppContext::new(&cli);
    if let Err(e) = run(&ctx, &cli) {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        if let Some(core_err) = e.downcast_ref::<SiteCryptError>() {
            CliError::from(core_err).exit();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_codes::GENERAL);
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Build(args) => build::handle_build(ctx, args),
        Commands::Verify(args) => verify::handle_verify(ctx, args),
        Commands::Decrypt(args) => decrypt::handle_decrypt(ctx, args),
        Commands::Completions { shell } => misc::handle_completions(*shell),
    }
}

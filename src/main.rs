//! Binary entry point for pagegate.
//!
//! This binary provides the CLI interface for the pagegate MCP gateway.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use pagegate::cli::{CheckCommand, ServeCommand};
use pagegate::config::GateConfig;
use pagegate::observability::{self, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Pagegate - scoped-access MCP gateway for hierarchical workspace APIs.
#[derive(Parser)]
#[command(name = "pagegate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server over stdio.
    Serve,
    /// Resolve a page id or URL against the configured root scope.
    Check {
        /// Page id (with or without hyphens) or workspace page URL.
        target: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env if present; real environment always wins.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = observability::init(&LoggingConfig::from_env(cli.verbose)) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match &cli.config {
        Some(path) => match GateConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load config: {e}");
                return ExitCode::FAILURE;
            },
        },
        None => GateConfig::load_default(),
    };

    match cli.command {
        Commands::Serve => match ServeCommand::run(&config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("serve failed: {e}");
                ExitCode::FAILURE
            },
        },
        Commands::Check { target } => match CheckCommand::run(&config, &target).await {
            Ok(true) => {
                println!("allowed");
                ExitCode::SUCCESS
            },
            Ok(false) => {
                println!("denied");
                ExitCode::FAILURE
            },
            Err(e) => {
                eprintln!("check failed: {e}");
                ExitCode::FAILURE
            },
        },
    }
}

//! Transync - translation resource synchronizer
//!
//! Moves localizable resource files from source repositories to a
//! translation platform and brings reviewed translations back.

use clap::Parser;

mod bundle;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod git;
mod logging;
mod pullrequest;
mod repository;
mod transifex;
mod validator;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Upload(args) => commands::upload::run(args),
        Commands::Download(args) => commands::download::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::PullRequests(args) => commands::pull_requests::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

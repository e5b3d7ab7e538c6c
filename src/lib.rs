//! ShiftTrack library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind it (gateway client, normalizer, session store, reports, export).

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod session;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Endpoints => commands::endpoints::handle(cfg),
        Commands::Register { .. }
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Whoami => commands::auth::handle(&cli.command, cfg),
        Commands::Profile => commands::profile::handle(cfg),
        Commands::Start { .. } | Commands::End { .. } | Commands::Status => {
            commands::shift::handle(&cli.command, cfg)
        }
        Commands::Reports { .. } => commands::reports::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Users { action } => commands::users::handle(action, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(base) = &cli.webhook_base {
        cfg.webhook_base = base.clone();
    }
    tracing::debug!(database = %cfg.database, webhook_base = %cfg.webhook_base, "configuration loaded");

    dispatch(&cli, &cfg)
}

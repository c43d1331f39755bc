//! logbook library root.
//! Exposes the CLI parser, the high-level run() function, the row model and
//! the spreadsheet codec.

pub mod cli;
pub mod codec;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Convert { .. } | Commands::New { .. } => {
            cli::commands::convert::handle(&cli.command, cfg)
        }
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once (custom path from --config when given)
    let cfg = Config::load(cli.config.as_deref())?;

    // 3️⃣ message colours follow the config
    ui::messages::set_color(cfg.color);

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}

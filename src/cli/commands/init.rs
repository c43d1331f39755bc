use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Writes the default configuration file unless one already exists.
/// In test mode nothing is written.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = Config::resolve_path(cli.config.as_deref());

    info("Initializing logbook…");
    info(format!("Config file : {}", path.display()));

    if cli.test {
        warning("Test mode: configuration file not written");
        return Ok(());
    }

    if path.exists() {
        warning(format!(
            "Configuration already present at {}, leaving it untouched",
            path.display()
        ));
        return Ok(());
    }

    Config::default().save_to(&path)?;
    success(format!("Configuration written to {}", path.display()));
    Ok(())
}

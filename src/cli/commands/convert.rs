use crate::cli::commands::show::import_file;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Logbook;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use std::path::Path;

/// Handle `convert` (import + export) and `new` (insert + export).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut book = Logbook::new();

    let (format, out_dir, force) = match cmd {
        Commands::Convert {
            file,
            format,
            out_dir,
            force,
        } => {
            import_file(&mut book, Path::new(file))?;
            (format, out_dir, force)
        }
        Commands::New {
            format,
            out_dir,
            force,
        } => {
            book.insert_row();
            (format, out_dir, force)
        }
        _ => return Ok(()),
    };

    ExportLogic::export(
        &mut book,
        cfg,
        format.unwrap_or(cfg.default_format),
        out_dir.as_deref(),
        *force,
    )?;
    Ok(())
}

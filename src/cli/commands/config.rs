use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = &cli.command
    {
        let path = Config::resolve_path(cli.config.as_deref());

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let missing = Config::missing_keys(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete");
            } else {
                for key in &missing {
                    warning(format!("Missing key '{key}' (default value in use)"));
                }
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            if run_editor(&editor_to_use, &path) {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            } else {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));
                if run_editor(&default_editor, &path) {
                    success(format!(
                        "Configuration file edited successfully using fallback '{}'",
                        default_editor
                    ));
                } else {
                    error(format!(
                        "Failed to edit configuration file using fallback '{}'",
                        default_editor
                    ));
                }
            }
        }

        if !*print_config && !*check && !*edit_config {
            info("Nothing to do: use --print, --check or --edit");
        }
    }

    Ok(())
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

//! Interactive session: one input line is one user action on the logbook.

use crate::cli::commands::show::{import_file, print_chart, print_logbook};
use crate::config::Config;
use crate::core::Logbook;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::models::CellValue;
use crate::models::cell::format_number;
use crate::ui::messages::{error, info, success};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
struct SessionLine {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Load a spreadsheet, replacing the current rows
    Import { file: String },

    /// Change one field: edit <ROW> <FIELD> <VALUE...>
    Edit {
        row: usize,
        field: String,
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Append an empty trip dated today
    Insert,

    /// Print the rows as a table
    Show,

    /// Print a bar chart of travel distances
    Chart,

    /// Write the rows to a file named after today's date
    Export {
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the session journal
    Log,

    /// Discard every row and start over
    Reload,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a> {
    book: Logbook,
    cfg: &'a Config,
}

impl<'a> Session<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self {
            book: Logbook::new(),
            cfg,
        }
    }

    pub fn logbook(&self) -> &Logbook {
        &self.book
    }

    /// Parse and run one line. Blank lines and `#` comments are ignored.
    /// Arguments follow shell quoting, so paths with spaces can be quoted.
    pub fn execute(&mut self, line: &str) -> AppResult<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = shlex::split(trimmed)
            .ok_or_else(|| AppError::Session(format!("Unbalanced quotes in: {trimmed}")))?;

        let parsed = match SessionLine::try_parse_from(words) {
            Ok(p) => p,
            Err(e) if e.use_stderr() => return Err(AppError::Session(e.to_string())),
            Err(e) => {
                print!("{e}");
                return Ok(Flow::Continue);
            }
        };

        self.apply(parsed.action)
    }

    /// Like [`Session::execute`], reporting errors instead of returning them.
    pub fn execute_reporting(&mut self, line: &str) -> Flow {
        let result = self.execute(line);
        self.report(result)
    }

    /// Import `file` directly, bypassing line parsing.
    pub fn open_reporting(&mut self, file: &str) -> Flow {
        let result = import_file(&mut self.book, Path::new(file)).map(|_| Flow::Continue);
        self.report(result)
    }

    fn report(&mut self, result: AppResult<Flow>) -> Flow {
        match result {
            Ok(flow) => flow,
            Err(e) => {
                error(&e);
                self.book.note("error", "", e.to_string());
                Flow::Continue
            }
        }
    }

    fn apply(&mut self, action: Action) -> AppResult<Flow> {
        match action {
            Action::Import { file } => {
                import_file(&mut self.book, Path::new(&file))?;
            }
            Action::Edit { row, field, value } => {
                let value = CellValue::parse_input(&value.join(" "));
                match self.book.edit_field(row, &field, value)? {
                    Some(c) => {
                        if let Some(r) = c.get(row) {
                            success(format!(
                                "Row {row} updated: travel distance {}",
                                format_number(r.distance_diff())
                            ));
                        }
                    }
                    None => info("No data loaded, nothing to edit."),
                }
            }
            Action::Insert => {
                let len = self.book.insert_row().len();
                success(format!("Row {} added", len - 1));
            }
            Action::Show => print_logbook(&self.book, self.cfg),
            Action::Chart => print_chart(&self.book, self.cfg),
            Action::Export {
                format,
                out_dir,
                force,
            } => {
                ExportLogic::export(
                    &mut self.book,
                    self.cfg,
                    format.unwrap_or(self.cfg.default_format),
                    out_dir.as_deref(),
                    force,
                )?;
            }
            Action::Log => {
                if self.book.journal().is_empty() {
                    info("Journal is empty.");
                } else {
                    println!("📜 Session journal:\n");
                    print!("{}", self.book.journal().render(self.cfg.color));
                }
            }
            Action::Reload => {
                self.book.reload();
                success("Session reset: no data loaded");
            }
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for logbook
/// CLI application to keep a vehicle mileage logbook in spreadsheet files
#[derive(Parser)]
#[command(
    name = "logbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small mileage logbook CLI: import a spreadsheet, edit trips and export them again",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or custom setups)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Import a spreadsheet and print it as a table
    Show {
        /// Spreadsheet file (xlsx, xls, xlsb, ods)
        file: String,

        /// Also print a bar chart of the travel distances
        #[arg(long)]
        chart: bool,
    },

    /// Import a spreadsheet, normalize it and export it again
    Convert {
        /// Spreadsheet file (xlsx, xls, xlsb, ods)
        file: String,

        /// Export format (defaults to `default_format` from the config)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Output directory (defaults to `export_dir` from the config)
        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a new logbook with one empty trip dated today
    New {
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Start an interactive editing session reading commands from stdin
    Session {
        /// Spreadsheet to import when the session starts
        #[arg(long)]
        file: Option<String>,
    },
}

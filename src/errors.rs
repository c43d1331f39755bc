//! Unified application error type.
//! Every module (codec, core, export, cli, config) returns AppError so that
//! the session loop and the one-shot commands report failures the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Spreadsheet codec
    // ---------------------------
    #[error("Cannot read spreadsheet: {0}")]
    Decode(String),

    #[error("Spreadsheet write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Row model
    // ---------------------------
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Row {0} does not exist")]
    InvalidRow(usize),

    #[error("Field '{0}' is computed and cannot be edited")]
    DerivedField(String),

    #[error("No data to export")]
    EmptyCollection,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export / session
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("{0}")]
    Session(String),
}

pub type AppResult<T> = Result<T, AppError>;

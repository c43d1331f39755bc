// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;

pub use json_csv::{to_csv, to_json};
pub use logic::ExportLogic;

use crate::ui::messages::success;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Common helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension, also used as the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "XLSX",
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

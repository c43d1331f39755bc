// src/export/logic.rs

use crate::codec;
use crate::config::Config;
use crate::core::Logbook;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{to_csv, to_json};
use crate::export::{ExportFormat, notify_export_success};
use crate::models::Record;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};

/// High-level export: logbook → bytes → file on disk.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the current collection.
    ///
    /// - `format`: target encoding (the file extension follows it)
    /// - `out_dir`: target directory, defaults to `export_dir` from the config
    /// - `force`: overwrite an existing file without asking
    ///
    /// Returns the written path. Nothing is written when the logbook is empty.
    pub fn export(
        book: &mut Logbook,
        cfg: &Config,
        format: ExportFormat,
        out_dir: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let bundle = book.export_records(&cfg.file_prefix, format.as_str())?;

        let dir = expand_tilde(out_dir.unwrap_or(&cfg.export_dir));
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(&dir)?;
        }
        let path = dir.join(&bundle.file_name);

        ensure_writable(&path, force)?;

        info(format!("Exporting to {}: {}", format.label(), path.display()));
        write_records(&bundle.records, format, &cfg.sheet_label, &path)?;
        notify_export_success(format.label(), &path);

        book.note(
            "export",
            &bundle.file_name,
            format!("{} rows", bundle.records.len()),
        );

        Ok(path)
    }
}

/// Encode `records` in `format` and write them to `path`.
pub fn write_records(
    records: &[Record],
    format: ExportFormat,
    sheet_label: &str,
    path: &Path,
) -> AppResult<()> {
    let bytes = match format {
        ExportFormat::Xlsx => codec::encode(records, sheet_label)?,
        ExportFormat::Csv => to_csv(records)?,
        ExportFormat::Json => to_json(records)?,
    };

    fs::write(path, bytes)?;
    Ok(())
}

//! Spreadsheet codec: workbook bytes ⇄ plain key/value records.

mod reader;
mod writer;

pub use reader::decode;
pub use writer::encode;

use crate::errors::AppResult;
use crate::models::Record;
use crate::utils::date::format_date;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// `<prefix>_<YYYY-MM-DD>.<ext>`
pub fn export_file_name(prefix: &str, date: NaiveDate, ext: &str) -> String {
    format!("{prefix}_{}.{ext}", format_date(date))
}

/// Read a whole spreadsheet file into memory.
pub fn read_file(path: &Path) -> AppResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Read and decode a spreadsheet file.
pub fn decode_file(path: &Path) -> AppResult<Vec<Record>> {
    let bytes = read_file(path)?;
    decode(&bytes)
}

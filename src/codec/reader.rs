// src/codec/reader.rs

use crate::errors::{AppError, AppResult};
use crate::models::{CellValue, Record};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Decode a workbook payload into one record per data row of the first sheet.
///
/// The first row of the used range is the header. Empty cells are left out
/// of the record and rows without any value are skipped. Date-formatted
/// cells come back as their numeric serial.
pub fn decode(bytes: &[u8]) -> AppResult<Vec<Record>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::Decode(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Decode("workbook contains no sheets".to_string()))?
        .map_err(|e| AppError::Decode(e.to_string()))?;

    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let record: Record = row
            .iter()
            .zip(headers.iter())
            .filter_map(|(cell, name)| {
                let value = cell_value(cell);
                (!value.is_empty()).then(|| (name.clone(), value))
            })
            .collect();

        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

/// Header row → unique field names (`__EMPTY`, `__EMPTY_1` for blanks,
/// `name_1`, `name_2` for repeats).
fn header_names(row: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(row.len());

    for cell in row {
        let base = match cell_value(cell) {
            CellValue::Empty => "__EMPTY".to_string(),
            CellValue::Text(s) if s.trim().is_empty() => "__EMPTY".to_string(),
            other => other.to_string(),
        };

        let mut name = base.clone();
        let mut n = 0;
        while names.contains(&name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        names.push(name);
    }

    names
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

use crate::errors::{AppError, AppResult};
use crate::models::cell::{CellValue, Record, collect_headers};
use crate::models::log_row::{KNOWN_FIELDS, LogField, LogRow};

/// Ordered set of log rows plus the column order used on export.
#[derive(Debug, Clone, PartialEq)]
pub struct LogCollection {
    rows: Vec<LogRow>,
    columns: Vec<String>,
}

impl Default for LogCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl LogCollection {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            columns: KNOWN_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build a collection from decoded records.
    ///
    /// Columns follow the source header order; known fields missing from the
    /// source are appended. Fails without side effects on the first record
    /// whose date cannot be normalized.
    pub fn from_records(records: &[Record]) -> AppResult<Self> {
        let rows = records
            .iter()
            .map(LogRow::from_record)
            .collect::<AppResult<Vec<_>>>()?;

        let mut columns = collect_headers(records);
        for known in KNOWN_FIELDS {
            if !columns.iter().any(|c| c == known) {
                columns.push(known.to_string());
            }
        }

        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&LogRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns that are not one of the known log fields.
    pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !KNOWN_FIELDS.contains(c))
    }

    pub fn push(&mut self, row: LogRow) {
        self.rows.push(row);
    }

    /// Edit one field of one row in place.
    pub fn edit(&mut self, index: usize, field: &LogField, value: CellValue) -> AppResult<()> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(AppError::InvalidRow(index))?;

        row.apply(field, value)?;

        if let LogField::Extra(name) = field
            && !self.columns.iter().any(|c| c == name)
        {
            self.columns.push(name.clone());
        }
        Ok(())
    }

    /// Plain records in column order, ready for encoding.
    pub fn to_records(&self) -> Vec<Record> {
        let fields: Vec<LogField> = self.columns.iter().map(|c| LogField::parse(c)).collect();

        self.rows
            .iter()
            .map(|row| {
                fields
                    .iter()
                    .filter_map(|f| row.value(f).map(|v| (f.name().to_string(), v)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::log_row::{DATE, DISTANCE_DIFF, DISTANCE_START, DISTANCE_STOP};

    fn sample() -> LogCollection {
        let records = vec![
            Record::new()
                .with("trip", "work")
                .with(DATE, "2024-02-01")
                .with(DISTANCE_START, 10.0)
                .with(DISTANCE_STOP, 30.0),
            Record::new()
                .with(DATE, "2024-02-02")
                .with(DISTANCE_START, 30.0)
                .with(DISTANCE_STOP, 45.0),
        ];
        LogCollection::from_records(&records).unwrap()
    }

    #[test]
    fn columns_keep_source_order_and_append_missing_known_fields() {
        let c = sample();
        assert_eq!(
            c.columns(),
            &["trip", DATE, DISTANCE_START, DISTANCE_STOP, DISTANCE_DIFF]
        );
        assert_eq!(c.extra_columns().collect::<Vec<_>>(), vec!["trip"]);
    }

    #[test]
    fn edit_touches_exactly_one_row() {
        let mut c = sample();
        let before = c.clone();
        c.edit(1, &LogField::DistanceStop, CellValue::Number(60.0))
            .unwrap();
        assert_eq!(c.get(0), before.get(0));
        assert_eq!(c.get(1).unwrap().distance_diff(), 30.0);
    }

    #[test]
    fn edit_out_of_range_is_rejected() {
        let mut c = sample();
        let before = c.clone();
        let err = c
            .edit(5, &LogField::Date, CellValue::from("2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRow(5)));
        assert_eq!(c, before);
    }

    #[test]
    fn new_extra_field_is_exported() {
        let mut c = sample();
        c.edit(0, &LogField::Extra("note".into()), CellValue::from("tolls"))
            .unwrap();
        let records = c.to_records();
        assert_eq!(records[0].get("note"), Some(&CellValue::from("tolls")));
        assert_eq!(records[1].get("note"), None);
        assert_eq!(c.columns().last().map(String::as_str), Some("note"));
    }

    #[test]
    fn records_include_the_derived_diff() {
        let records = sample().to_records();
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            vec!["trip", DATE, DISTANCE_START, DISTANCE_STOP, DISTANCE_DIFF]
        );
        assert_eq!(records[0].get(DISTANCE_DIFF), Some(&CellValue::Number(20.0)));
        assert_eq!(records[1].get("trip"), None);
    }

    #[test]
    fn invalid_serial_fails_the_whole_import() {
        let records = vec![
            Record::new().with(DATE, 45000.0),
            Record::new().with(DATE, f64::INFINITY),
        ];
        assert!(matches!(
            LogCollection::from_records(&records),
            Err(AppError::InvalidDate(_))
        ));
    }
}

use crate::errors::{AppError, AppResult};
use crate::models::cell::{CellValue, Record};
use crate::utils::date::{excel_serial_to_string, format_date};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const DATE: &str = "date";
pub const DISTANCE_START: &str = "distance_start";
pub const DISTANCE_STOP: &str = "distance_stop";
pub const DISTANCE_DIFF: &str = "distance_diff";

/// Known columns, in the order they are appended when a source lacks them.
pub const KNOWN_FIELDS: [&str; 4] = [DATE, DISTANCE_START, DISTANCE_STOP, DISTANCE_DIFF];

/// Addressable field of a [`LogRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogField {
    Date,
    DistanceStart,
    DistanceStop,
    DistanceDiff,
    Extra(String),
}

impl LogField {
    pub fn parse(name: &str) -> Self {
        match name {
            DATE => LogField::Date,
            DISTANCE_START => LogField::DistanceStart,
            DISTANCE_STOP => LogField::DistanceStop,
            DISTANCE_DIFF => LogField::DistanceDiff,
            other => LogField::Extra(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LogField::Date => DATE,
            LogField::DistanceStart => DISTANCE_START,
            LogField::DistanceStop => DISTANCE_STOP,
            LogField::DistanceDiff => DISTANCE_DIFF,
            LogField::Extra(name) => name,
        }
    }
}

/// One trip in the logbook.
///
/// `distance_diff` is private and only ever written by the distance
/// setters, so it always equals `distance_stop - distance_start`.
///
/// The numeric operands feed the diff; the source cells are what gets
/// exported until the field is edited (`None` when the source lacked it).
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    date: String,
    distance_start: f64,
    distance_stop: f64,
    distance_diff: f64,
    start_cell: Option<CellValue>,
    stop_cell: Option<CellValue>,
    extra: BTreeMap<String, CellValue>,
}

impl LogRow {
    pub fn new(date: impl Into<String>, distance_start: f64, distance_stop: f64) -> Self {
        Self {
            date: date.into(),
            distance_start,
            distance_stop,
            distance_diff: distance_stop - distance_start,
            start_cell: Some(CellValue::Number(distance_start)),
            stop_cell: Some(CellValue::Number(distance_stop)),
            extra: BTreeMap::new(),
        }
    }

    /// Row appended by "insert row": the given date and zero distances.
    pub fn blank(date: NaiveDate) -> Self {
        Self::new(format_date(date), 0.0, 0.0)
    }

    /// Normalize one decoded record.
    ///
    /// Numeric dates are converted from spreadsheet serials. Distances are
    /// coerced to numbers for the diff (missing ones count as NaN) while the
    /// source cells are kept as they were. Every unknown key is carried
    /// over untouched. A `distance_diff` present in the source is discarded
    /// in favour of the recomputed value.
    pub fn from_record(record: &Record) -> AppResult<Self> {
        let date = normalize_date(record.get(DATE).unwrap_or(&CellValue::Empty))?;
        let start_cell = record.get(DISTANCE_START).cloned();
        let stop_cell = record.get(DISTANCE_STOP).cloned();
        let start = start_cell.as_ref().map_or(f64::NAN, CellValue::as_number);
        let stop = stop_cell.as_ref().map_or(f64::NAN, CellValue::as_number);

        let mut row = Self::new(date, start, stop);
        row.start_cell = start_cell;
        row.stop_cell = stop_cell;
        for (key, value) in record.iter() {
            if let LogField::Extra(name) = LogField::parse(key) {
                row.extra.insert(name, value.clone());
            }
        }
        Ok(row)
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn distance_start(&self) -> f64 {
        self.distance_start
    }

    pub fn distance_stop(&self) -> f64 {
        self.distance_stop
    }

    pub fn distance_diff(&self) -> f64 {
        self.distance_diff
    }

    pub fn extra(&self) -> &BTreeMap<String, CellValue> {
        &self.extra
    }

    pub fn set_date(&mut self, value: &CellValue) -> AppResult<()> {
        self.date = normalize_date(value)?;
        Ok(())
    }

    pub fn set_distance_start(&mut self, value: f64) {
        self.distance_diff = self.distance_stop - value;
        self.distance_start = value;
        self.start_cell = Some(CellValue::Number(value));
    }

    pub fn set_distance_stop(&mut self, value: f64) {
        self.distance_diff = value - self.distance_start;
        self.distance_stop = value;
        self.stop_cell = Some(CellValue::Number(value));
    }

    /// Apply one field edit, keeping `distance_diff` consistent.
    pub fn apply(&mut self, field: &LogField, value: CellValue) -> AppResult<()> {
        match field {
            LogField::Date => self.set_date(&value)?,
            LogField::DistanceStart => self.set_distance_start(value.as_number()),
            LogField::DistanceStop => self.set_distance_stop(value.as_number()),
            LogField::DistanceDiff => {
                return Err(AppError::DerivedField(DISTANCE_DIFF.to_string()));
            }
            LogField::Extra(name) => {
                self.extra.insert(name.clone(), value);
            }
        }
        Ok(())
    }

    /// Exported value of a field, `None` when the row has no such cell.
    pub fn value(&self, field: &LogField) -> Option<CellValue> {
        match field {
            LogField::Date => Some(CellValue::Text(self.date.clone())),
            LogField::DistanceStart => self.start_cell.clone(),
            LogField::DistanceStop => self.stop_cell.clone(),
            LogField::DistanceDiff => Some(CellValue::Number(self.distance_diff)),
            LogField::Extra(name) => self.extra.get(name).cloned(),
        }
    }
}

/// Dates are stored as text: serials are converted, other values kept.
fn normalize_date(value: &CellValue) -> AppResult<String> {
    match value {
        CellValue::Number(serial) => excel_serial_to_string(*serial)
            .ok_or_else(|| AppError::InvalidDate(format!("serial {serial} is out of range"))),
        CellValue::Text(s) => Ok(s.clone()),
        CellValue::Bool(b) => Ok(b.to_string()),
        CellValue::Empty => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> LogRow {
        LogRow::new("2024-04-01", 100.0, 180.0)
    }

    #[test]
    fn editing_stop_uses_current_start() {
        let mut row = trip();
        row.apply(&LogField::DistanceStop, CellValue::Number(250.0))
            .unwrap();
        assert_eq!(row.distance_stop(), 250.0);
        assert_eq!(row.distance_diff(), 150.0);
    }

    #[test]
    fn editing_start_uses_current_stop() {
        let mut row = trip();
        row.apply(&LogField::DistanceStart, CellValue::Text("150".into()))
            .unwrap();
        assert_eq!(row.distance_start(), 150.0);
        assert_eq!(row.distance_diff(), 30.0);
    }

    #[test]
    fn editing_other_fields_keeps_diff() {
        let mut row = trip();
        row.apply(&LogField::Date, CellValue::from("2024-04-02"))
            .unwrap();
        row.apply(&LogField::Extra("driver".into()), CellValue::from("Sam"))
            .unwrap();
        assert_eq!(row.distance_diff(), 80.0);
        assert_eq!(row.date(), "2024-04-02");
        assert_eq!(row.extra().get("driver"), Some(&CellValue::from("Sam")));
    }

    #[test]
    fn diff_is_not_editable() {
        let mut row = trip();
        let err = row
            .apply(&LogField::DistanceDiff, CellValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, AppError::DerivedField(_)));
        assert_eq!(row.distance_diff(), 80.0);
    }

    #[test]
    fn numeric_date_edit_is_converted() {
        let mut row = trip();
        row.apply(&LogField::Date, CellValue::Number(45000.0))
            .unwrap();
        assert_eq!(row.date(), "2023-03-15");
    }

    #[test]
    fn record_with_missing_operand_yields_nan() {
        let record = Record::new().with(DATE, "2024-01-01").with(DISTANCE_STOP, 10.0);
        let row = LogRow::from_record(&record).unwrap();
        assert!(row.distance_start().is_nan());
        assert!(row.distance_diff().is_nan());
        assert_eq!(row.distance_stop(), 10.0);
    }

    #[test]
    fn source_distance_cells_are_exported_as_read() {
        let record = Record::new()
            .with(DATE, "2024-01-01")
            .with(DISTANCE_START, "12 km")
            .with(DISTANCE_STOP, 20.0);
        let mut row = LogRow::from_record(&record).unwrap();
        assert!(row.distance_diff().is_nan());
        assert_eq!(
            row.value(&LogField::DistanceStart),
            Some(CellValue::from("12 km"))
        );

        let missing = Record::new().with(DATE, "2024-01-02").with(DISTANCE_STOP, 5.0);
        let other = LogRow::from_record(&missing).unwrap();
        assert_eq!(other.value(&LogField::DistanceStart), None);

        row.apply(&LogField::DistanceStart, CellValue::from("12"))
            .unwrap();
        assert_eq!(
            row.value(&LogField::DistanceStart),
            Some(CellValue::Number(12.0))
        );
        assert_eq!(row.distance_diff(), 8.0);
    }

    #[test]
    fn record_keeps_pass_through_fields_and_drops_source_diff() {
        let record = Record::new()
            .with(DATE, 45000.0)
            .with("vehicle", "van")
            .with(DISTANCE_START, 1.0)
            .with(DISTANCE_STOP, 4.0)
            .with(DISTANCE_DIFF, 999.0);
        let row = LogRow::from_record(&record).unwrap();
        assert_eq!(row.date(), "2023-03-15");
        assert_eq!(row.distance_diff(), 3.0);
        assert_eq!(row.extra().len(), 1);
        assert_eq!(row.extra().get("vehicle"), Some(&CellValue::from("van")));
    }

    #[test]
    fn field_names_round_trip() {
        for name in KNOWN_FIELDS {
            assert_eq!(LogField::parse(name).name(), name);
        }
        assert_eq!(LogField::parse("notes"), LogField::Extra("notes".into()));
    }
}

// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::models::cell::collect_headers;

/// JSON array of objects, keys in column order. NaN becomes `null`.
pub fn to_json(records: &[Record]) -> AppResult<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(records)?;
    data.push(b'\n');
    Ok(data)
}

/// CSV with a header row; missing keys are written as empty fields.
pub fn to_csv(records: &[Record]) -> AppResult<Vec<u8>> {
    let headers = collect_headers(records);
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(&headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(h).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new()
                .with("date", "2024-03-01")
                .with("distance_start", 10.0)
                .with("distance_diff", f64::NAN),
            Record::new()
                .with("date", "2024-03-02")
                .with("note", "a, b"),
        ]
    }

    #[test]
    fn csv_has_header_and_blank_missing_fields() {
        let out = String::from_utf8(to_csv(&records()).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "date,distance_start,distance_diff,note");
        assert_eq!(lines[1], "2024-03-01,10,NaN,");
        assert_eq!(lines[2], "2024-03-02,,,\"a, b\"");
    }

    #[test]
    fn json_keeps_key_order_and_nulls_nan() {
        let out = to_json(&records()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["distance_diff"], serde_json::Value::Null);
        assert_eq!(value[1]["note"], "a, b");

        let text = String::from_utf8(out).unwrap();
        let date_pos = text.find("\"date\"").unwrap();
        let start_pos = text.find("\"distance_start\"").unwrap();
        assert!(date_pos < start_pos);
    }
}
